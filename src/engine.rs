//! The search engine that ranks, suggests and highlights lead records.

use crate::record::{RecordField, SearchRecord};
use crate::searchers::highlight::HighlightedResult;
use crate::searchers::scorer::calculate_search_score;
use crate::searchers::tokenizer::PreparedQuery;
use crate::searchers::{simple, suggest};
use crate::types::{SearchOptions, SearchResult};
use crate::weights::{FieldWeightTable, SIMPLE_SEARCH_FIELDS, SUGGESTION_FIELDS};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Ranks, suggests and highlights over caller-supplied records.
///
/// The engine holds only its immutable configuration, so one instance can be
/// shared across threads and calls. Every operation is a pure function of its
/// arguments.
///
/// # Examples
///
/// ```rust
/// use ems_search::prelude::*;
///
/// let engine = SearchEngine::default();
/// let leads = vec![
///     SearchRecord::new().with(RecordField::Source, "john's referral"),
///     SearchRecord::new().with(RecordField::Name, "John Doe"),
/// ];
///
/// let results = engine.search(&leads, "john", &SearchOptions::default());
/// assert_eq!(results[0].item.name.as_deref(), Some("John Doe"));
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine {
  /// Weighted fields used for ranking.
  weights: FieldWeightTable,
  /// Fields scanned for suggestions.
  suggestion_fields: Vec<RecordField>,
}

impl SearchEngine {
  /// Creates an engine with a custom weight table and the default
  /// suggestion fields.
  pub fn new(weights: FieldWeightTable) -> Self {
    Self {
      weights,
      suggestion_fields: SUGGESTION_FIELDS.to_vec(),
    }
  }

  /// Creates a new `SearchEngineBuilder` to construct an engine.
  pub fn builder() -> SearchEngineBuilder {
    SearchEngineBuilder::new()
  }

  pub fn weights(&self) -> &FieldWeightTable {
    &self.weights
  }

  /// Ranks `records` against `query`.
  ///
  /// ## Ranking
  ///
  /// 1. A blank query returns every record unranked (score 0) in input order.
  /// 2. The query is trimmed, case-folded unless `case_sensitive`, and split on
  ///    whitespace.
  /// 3. Active fields are the weight table restricted by `include_fields` and
  ///    `exclude_fields`.
  /// 4. Every record is scored; results below `min_score` are dropped.
  /// 5. Results are sorted by score, highest first. Equal scores keep their
  ///    input order.
  /// 6. At most `max_results` results are returned.
  pub fn search(&self, records: &[SearchRecord], query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    let prepared = PreparedQuery::new(query, options.case_sensitive);
    if prepared.is_empty() {
      debug!("Blank query, returning {} records unranked", records.len());
      return records.iter().cloned().map(SearchResult::unranked).collect();
    }

    let fields = options.active_fields(&self.weights);
    trace!("Scoring {} records over {} fields", records.len(), fields.len());

    #[cfg(feature = "parallel")]
    let mut results: Vec<SearchResult> = records
      .par_iter()
      .filter_map(|record| {
        let score = calculate_search_score(record, &prepared, &fields);
        (score.value >= options.min_score).then(|| SearchResult::from_score(record.clone(), score))
      })
      .collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<SearchResult> = records
      .iter()
      .filter_map(|record| {
        let score = calculate_search_score(record, &prepared, &fields);
        (score.value >= options.min_score).then(|| SearchResult::from_score(record.clone(), score))
      })
      .collect();

    sort_results(&mut results);
    results.truncate(options.max_results);

    debug!(
      "Query '{}' matched {} of {} records",
      prepared.text,
      results.len(),
      records.len()
    );
    results
  }

  /// Autocomplete suggestions for a partial query; see
  /// [`get_search_suggestions`](suggest::get_search_suggestions).
  pub fn suggestions(&self, records: &[SearchRecord], partial: &str, max_suggestions: usize) -> Vec<String> {
    let suggestions =
      suggest::get_search_suggestions(records, partial, &self.suggestion_fields, max_suggestions);
    trace!("{} suggestions for '{}'", suggestions.len(), partial);
    suggestions
  }

  /// Ranks like [`search`](Self::search) and attaches highlights for every
  /// matched field. `records` is never modified.
  pub fn search_with_highlighting(
    &self,
    records: &[SearchRecord],
    query: &str,
    options: &SearchOptions,
  ) -> Vec<HighlightedResult> {
    self
      .search(records, query, options)
      .into_iter()
      .map(|result| HighlightedResult::new(result, query))
      .collect()
  }
}

impl Default for SearchEngine {
  /// An engine using the reference weight table.
  fn default() -> Self {
    Self::new(FieldWeightTable::reference())
  }
}

/// Sort results by score in descending order. The sort is stable.
#[cfg(feature = "parallel")]
fn sort_results(results: &mut [SearchResult]) {
  results.par_sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });
}

/// Sort results by score in descending order. The sort is stable.
#[cfg(not(feature = "parallel"))]
fn sort_results(results: &mut [SearchResult]) {
  results.sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });
}

/// A builder for creating `SearchEngine` instances.
#[derive(Debug, Default)]
pub struct SearchEngineBuilder {
  weights: Option<FieldWeightTable>,
  suggestion_fields: Option<Vec<RecordField>>,
}

impl SearchEngineBuilder {
  /// Creates a new, empty `SearchEngineBuilder`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the weight table. Defaults to [`FieldWeightTable::reference`].
  pub fn weights(mut self, weights: FieldWeightTable) -> Self {
    self.weights = Some(weights);
    self
  }

  /// Sets the fields scanned for suggestions.
  pub fn suggestion_fields(mut self, fields: impl IntoIterator<Item = RecordField>) -> Self {
    self.suggestion_fields = Some(fields.into_iter().collect());
    self
  }

  pub fn build(self) -> SearchEngine {
    SearchEngine {
      weights: self.weights.unwrap_or_default(),
      suggestion_fields: self
        .suggestion_fields
        .unwrap_or_else(|| SUGGESTION_FIELDS.to_vec()),
    }
  }
}

/// Ranks `records` with the reference weight table.
/// `None` options means [`SearchOptions::default`].
pub fn enhanced_search(
  records: &[SearchRecord],
  query: &str,
  options: Option<&SearchOptions>,
) -> Vec<SearchResult> {
  let defaults = SearchOptions::default();
  SearchEngine::default().search(records, query, options.unwrap_or(&defaults))
}

/// Unranked case-insensitive substring filter.
/// `None` fields means name, email and organization.
pub fn simple_search<'a>(
  records: &'a [SearchRecord],
  query: &str,
  fields: Option<&[RecordField]>,
) -> Vec<&'a SearchRecord> {
  simple::simple_search(records, query, fields.unwrap_or(&SIMPLE_SEARCH_FIELDS))
}

/// Autocomplete suggestions over the default suggestion fields.
/// `None` means at most [`DEFAULT_MAX_SUGGESTIONS`](suggest::DEFAULT_MAX_SUGGESTIONS).
pub fn get_search_suggestions(
  records: &[SearchRecord],
  partial: &str,
  max_suggestions: Option<usize>,
) -> Vec<String> {
  SearchEngine::default().suggestions(
    records,
    partial,
    max_suggestions.unwrap_or(suggest::DEFAULT_MAX_SUGGESTIONS),
  )
}

/// Ranked search with highlights, using the reference weight table.
pub fn search_with_highlighting(
  records: &[SearchRecord],
  query: &str,
  options: Option<&SearchOptions>,
) -> Vec<HighlightedResult> {
  let defaults = SearchOptions::default();
  SearchEngine::default().search_with_highlighting(records, query, options.unwrap_or(&defaults))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leads() -> Vec<SearchRecord> {
    vec![
      SearchRecord::new().with(RecordField::Source, "tech expo"),
      SearchRecord::new().with(RecordField::Organization, "TechCorp Inc"),
      SearchRecord::new().with(RecordField::Name, "Ravi Tech"),
      SearchRecord::new().with(RecordField::Name, "Unrelated"),
    ]
  }

  #[test]
  fn test_ranks_by_field_weight() {
    let results = SearchEngine::default().search(&leads(), "tech", &SearchOptions::default());
    let order: Vec<_> = results.iter().map(|r| r.matched_fields[0]).collect();
    assert_eq!(
      order,
      vec![RecordField::Name, RecordField::Organization, RecordField::Source]
    );
  }

  #[test]
  fn test_blank_query_passes_through() {
    let leads = leads();
    let results = SearchEngine::default().search(&leads, "  ", &SearchOptions::default().max_results(1));
    assert_eq!(results.len(), leads.len());
    assert!(results.iter().all(|r| r.score == 0.0 && r.matched_fields.is_empty()));
    assert_eq!(results[3].item, leads[3]);
  }

  #[test]
  fn test_min_score_and_max_results() {
    let engine = SearchEngine::default();
    let results = engine.search(&leads(), "tech", &SearchOptions::default().max_results(2));
    assert_eq!(results.len(), 2);

    let results = engine.search(&leads(), "tech", &SearchOptions::default().min_score(5.0));
    // source (weight 1) scores 2.2 and is dropped.
    assert_eq!(results.len(), 2);
  }

  #[test]
  fn test_custom_weights_change_order() {
    let weights = FieldWeightTable::builder()
      .field(RecordField::Source, 20)
      .field(RecordField::Name, 1)
      .build()
      .unwrap();
    let engine = SearchEngine::builder().weights(weights).build();
    let results = engine.search(&leads(), "tech", &SearchOptions::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].matched_fields, vec![RecordField::Source]);
  }

  #[test]
  fn test_custom_suggestion_fields() {
    let records = vec![SearchRecord::new().with(RecordField::Status, "Qualified")];
    let engine = SearchEngine::builder()
      .suggestion_fields([RecordField::Status])
      .build();
    assert_eq!(engine.suggestions(&records, "qual", 5), vec!["Qualified"]);
    assert!(SearchEngine::default().suggestions(&records, "qual", 5).is_empty());
  }

  #[test]
  fn test_greek_sigma_matches_in_any_position() {
    let records = vec![
      SearchRecord::new().with(RecordField::Name, "ΟΔΟΣ"),
      SearchRecord::new().with(RecordField::Name, "ΟΔΟΣΑ Labs"),
    ];
    let results = SearchEngine::default().search_with_highlighting(&records, "ΟΔΟΣ", &SearchOptions::default());
    assert_eq!(results.len(), 2);
    for result in &results {
      assert_eq!(result.result.exact_matches, vec![RecordField::Name]);
      assert_eq!(result.highlights.len(), 1);
      assert!(result.highlights[0].has_match());
    }
    assert_eq!(
      results[1].highlights[0].render("[", "]"),
      "[ΟΔΟΣ]Α Labs"
    );
  }

  #[cfg(feature = "parallel")]
  #[test]
  fn test_parallel_ranking_matches_sequential() {
    let records: Vec<SearchRecord> = (0..5000)
      .map(|i| match i % 4 {
        0 => SearchRecord::new()
          .with(RecordField::Id, format!("{i}"))
          .with(RecordField::Name, "Tech Labs"),
        1 => SearchRecord::new()
          .with(RecordField::Id, format!("{i}"))
          .with(RecordField::Organization, "tech"),
        2 => SearchRecord::new()
          .with(RecordField::Id, format!("{i}"))
          .with(RecordField::Service, "water tech")
          .with(RecordField::Region, "Tech Park"),
        _ => SearchRecord::new().with(RecordField::Id, format!("{i}")),
      })
      .collect();
    let options = SearchOptions::default().max_results(3000);

    let engine = SearchEngine::default();
    let prepared = PreparedQuery::new("tech labs", options.case_sensitive);
    let fields = options.active_fields(engine.weights());
    let mut expected: Vec<SearchResult> = records
      .iter()
      .filter_map(|record| {
        let score = calculate_search_score(record, &prepared, &fields);
        (score.value >= options.min_score).then(|| SearchResult::from_score(record.clone(), score))
      })
      .collect();
    expected.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
    expected.truncate(options.max_results);

    assert_eq!(engine.search(&records, "tech labs", &options), expected);
  }
}
