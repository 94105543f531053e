//! Unranked substring filter kept for callers that only need a yes/no match.

use crate::record::{RecordField, SearchRecord};
use crate::searchers::tokenizer::fold_case;

/// Returns the records where any of `fields` contains `query`, ignoring case.
///
/// Order is preserved and a blank query returns every record.
pub fn simple_search<'a>(
  records: &'a [SearchRecord],
  query: &str,
  fields: &[RecordField],
) -> Vec<&'a SearchRecord> {
  let needle = fold_case(query.trim());
  if needle.is_empty() {
    return records.iter().collect();
  }

  records
    .iter()
    .filter(|record| {
      fields.iter().any(|&field| {
        record
          .field_value(field)
          .map_or(false, |value| fold_case(&value).contains(&needle))
      })
    })
    .collect()
}
