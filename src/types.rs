//! Core data types for lead search.

use crate::error::Result;
use crate::record::{RecordField, SearchRecord};
use crate::weights::FieldWeightTable;
use serde::{Deserialize, Serialize};

/// Upper bound of any relevance score.
pub const MAX_SCORE: f64 = 100.0;

/// A ranked search result containing the matched record and why it matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
  /// The matched record.
  pub item: SearchRecord,
  /// Relevance score in `0.0..=100.0`; higher is better.
  pub score: f64,
  /// Every field that matched, in the order the scorer found them.
  pub matched_fields: Vec<RecordField>,
  /// Fields containing the whole query.
  pub exact_matches: Vec<RecordField>,
  /// Fields containing some of the query words but not the whole query.
  pub partial_matches: Vec<RecordField>,
}

impl SearchResult {
  /// A zero-score result with no matches, used when there is nothing to rank.
  pub fn unranked(item: SearchRecord) -> Self {
    Self::from_score(item, Score::default())
  }

  /// Attaches a computed score to its record.
  pub fn from_score(item: SearchRecord, score: Score) -> Self {
    Self {
      item,
      score: score.value,
      matched_fields: score.matched_fields,
      exact_matches: score.exact_matches,
      partial_matches: score.partial_matches,
    }
  }
}

/// The outcome of scoring one record, without the record itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
  pub value: f64,
  pub matched_fields: Vec<RecordField>,
  pub exact_matches: Vec<RecordField>,
  pub partial_matches: Vec<RecordField>,
}

impl Score {
  /// Whether any field matched.
  pub fn is_match(&self) -> bool {
    !self.matched_fields.is_empty()
  }
}

/// Options controlling a ranked search.
///
/// Field names are the camelCase names of [`RecordField`]; names that are
/// unknown or not in the weight table are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
  /// Results scoring below this are dropped.
  #[serde(default = "default_min_score")]
  pub min_score: f64,
  /// The maximum number of results to return.
  #[serde(default = "default_max_results")]
  pub max_results: usize,
  /// If set, only these fields are scored.
  #[serde(default)]
  pub include_fields: Option<Vec<String>>,
  /// Fields never scored. Takes precedence over `include_fields`.
  #[serde(default)]
  pub exclude_fields: Vec<String>,
  /// Compare without case folding.
  #[serde(default)]
  pub case_sensitive: bool,
}

fn default_min_score() -> f64 {
  0.1
}

fn default_max_results() -> usize {
  50
}

impl Default for SearchOptions {
  fn default() -> Self {
    Self {
      min_score: default_min_score(),
      max_results: default_max_results(),
      include_fields: None,
      exclude_fields: Vec::new(),
      case_sensitive: false,
    }
  }
}

impl SearchOptions {
  /// Parses options from JSON, filling omitted keys with defaults.
  pub fn from_json(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Sets the minimum score.
  pub fn min_score(mut self, min_score: f64) -> Self {
    self.min_score = min_score;
    self
  }

  /// Sets the maximum number of results.
  pub fn max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Restricts scoring to the given fields.
  pub fn include_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.include_fields = Some(fields.into_iter().map(Into::into).collect());
    self
  }

  /// Excludes a field from scoring.
  pub fn exclude_field(mut self, field: impl Into<String>) -> Self {
    self.exclude_fields.push(field.into());
    self
  }

  /// Enables or disables case-sensitive matching.
  pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
    self.case_sensitive = case_sensitive;
    self
  }

  /// Resolves the fields to score against `weights`:
  /// `(table ∩ include) − exclude`, in table order.
  pub fn active_fields(&self, weights: &FieldWeightTable) -> Vec<(RecordField, u32)> {
    let excluded: Vec<RecordField> = self
      .exclude_fields
      .iter()
      .filter_map(|name| RecordField::from_name(name))
      .collect();
    let included: Option<Vec<RecordField>> = self.include_fields.as_ref().map(|names| {
      names
        .iter()
        .filter_map(|name| RecordField::from_name(name))
        .collect()
    });

    weights
      .iter()
      .filter(|(field, _)| included.as_ref().map_or(true, |inc| inc.contains(field)))
      .filter(|(field, _)| !excluded.contains(field))
      .collect()
  }
}
