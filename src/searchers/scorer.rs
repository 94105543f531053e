//! Weighted multi-field relevance scoring.
//!
//! A field containing the whole query earns twice its weight. Otherwise it
//! earns its weight scaled by the share of query words it contains. Records
//! matching in more than one field get a 1.2x bonus, records with at least one
//! whole-query match a further 1.1x, and the total is capped at
//! [`MAX_SCORE`].

use crate::record::{RecordField, SearchRecord};
use crate::searchers::tokenizer::PreparedQuery;
use crate::types::{Score, MAX_SCORE};

const EXACT_MULTIPLIER: f64 = 2.0;
const CROSS_FIELD_BONUS: f64 = 1.2;
const EXACT_BONUS: f64 = 1.1;

/// Score one record against a prepared query over the given weighted fields.
///
/// `fields` is scanned in order; that order is the order of
/// `matched_fields` in the result.
pub fn calculate_search_score(
  record: &SearchRecord,
  query: &PreparedQuery,
  fields: &[(RecordField, u32)],
) -> Score {
  let mut score = Score::default();
  if query.is_empty() {
    return score;
  }

  let mut total = 0.0;
  let total_words = query.words.len();

  for &(field, weight) in fields {
    let raw = match record.field_value(field) {
      Some(raw) if !raw.is_empty() => raw,
      _ => continue,
    };
    let value = query.normalize(&raw);
    let weight = f64::from(weight);

    if value.contains(query.text.as_str()) {
      total += weight * EXACT_MULTIPLIER;
      push_unique(&mut score.matched_fields, field);
      score.exact_matches.push(field);
      continue;
    }

    let word_matches = query
      .words
      .iter()
      .filter(|word| value.contains(word.as_str()))
      .count();
    if word_matches > 0 {
      total += weight * (word_matches as f64 / total_words as f64);
      push_unique(&mut score.matched_fields, field);
      score.partial_matches.push(field);
    }
  }

  if score.matched_fields.len() > 1 {
    total *= CROSS_FIELD_BONUS;
  }
  if !score.exact_matches.is_empty() {
    total *= EXACT_BONUS;
  }

  score.value = total.min(MAX_SCORE);
  score
}

fn push_unique(fields: &mut Vec<RecordField>, field: RecordField) {
  if !fields.contains(&field) {
    fields.push(field);
  }
}
