//! Autocomplete suggestions drawn from record values.

use crate::record::{RecordField, SearchRecord};
use crate::searchers::tokenizer::fold_case;
use std::collections::HashSet;

/// Queries shorter than this produce no suggestions.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Default number of suggestions returned.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Words of a matching value this short are never suggested on their own.
const MIN_WORD_LEN: usize = 3;

/// Collect suggestions for a partial query.
///
/// Every value of `fields` containing `partial` (ignoring case) is a
/// candidate, as is every whitespace-separated word of it that is at least
/// three characters long and itself contains `partial`. Candidates keep the
/// casing of the data, are deduplicated exactly, and are ordered shortest
/// first, earlier-seen first among equal lengths.
pub fn get_search_suggestions(
  records: &[SearchRecord],
  partial: &str,
  fields: &[RecordField],
  max_suggestions: usize,
) -> Vec<String> {
  let needle = fold_case(partial.trim());
  if needle.chars().count() < MIN_SUGGESTION_QUERY_LEN {
    return Vec::new();
  }

  let mut seen: HashSet<String> = HashSet::new();
  let mut candidates: Vec<String> = Vec::new();
  let mut add = |candidate: &str| {
    if seen.insert(candidate.to_string()) {
      candidates.push(candidate.to_string());
    }
  };

  for record in records {
    for &field in fields {
      let value = match record.field_value(field) {
        Some(value) if !value.is_empty() => value,
        _ => continue,
      };
      if !fold_case(&value).contains(&needle) {
        continue;
      }

      add(value.as_ref());
      for word in value.split_whitespace() {
        if word.chars().count() >= MIN_WORD_LEN && fold_case(word).contains(&needle) {
          add(word);
        }
      }
    }
  }

  candidates.sort_by_key(|c| c.chars().count());
  candidates.truncate(max_suggestions);
  candidates
}
