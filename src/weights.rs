//! Field weight tables for weighted search.

use crate::error::{Result, SearchError};
use crate::record::RecordField;
use serde::{Deserialize, Serialize};

/// An ordered, immutable mapping from record field to scoring weight.
///
/// Iteration order is scoring order, which in turn decides the order fields
/// appear in [`SearchResult::matched_fields`](crate::types::SearchResult).
///
/// Deserialized tables go through [`FieldWeightTableBuilder::build`], so they
/// are validated the same way as tables built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(RecordField, u32)>", into = "Vec<(RecordField, u32)>")]
pub struct FieldWeightTable {
  entries: Vec<(RecordField, u32)>,
}

impl FieldWeightTable {
  /// Create a new table builder.
  pub fn builder() -> FieldWeightTableBuilder {
    FieldWeightTableBuilder::default()
  }

  /// The reference table used by the lead manager UI.
  ///
  /// These constants decide the relative order of results on screen and must
  /// not be retuned casually.
  pub fn reference() -> Self {
    use RecordField::*;

    Self {
      entries: vec![
        (Name, 10),
        (Email, 8),
        (Phone, 7),
        (Organization, 6),
        (Service, 5),
        (Subservice, 4),
        (Region, 3),
        (AgentName, 3),
        (AssignedAgent, 3),
        (SalesExecutiveName, 3),
        (SalesExecutive, 2),
        (Status, 2),
        (Priority, 2),
        (EnquiryDetails, 2),
        (Comments, 1),
        (Source, 1),
      ],
    }
  }

  /// Weight of `field`, or `None` if the table does not score it.
  pub fn weight(&self, field: RecordField) -> Option<u32> {
    self
      .entries
      .iter()
      .find(|(f, _)| *f == field)
      .map(|(_, w)| *w)
  }

  /// Whether `field` is scored by this table.
  pub fn contains(&self, field: RecordField) -> bool {
    self.weight(field).is_some()
  }

  /// Iterate over `(field, weight)` pairs in scoring order.
  pub fn iter(&self) -> impl Iterator<Item = (RecordField, u32)> + '_ {
    self.entries.iter().copied()
  }

  /// Fields in scoring order.
  pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
    self.entries.iter().map(|(f, _)| *f)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl TryFrom<Vec<(RecordField, u32)>> for FieldWeightTable {
  type Error = SearchError;

  fn try_from(entries: Vec<(RecordField, u32)>) -> Result<Self> {
    FieldWeightTableBuilder { entries }.build()
  }
}

impl From<FieldWeightTable> for Vec<(RecordField, u32)> {
  fn from(table: FieldWeightTable) -> Self {
    table.entries
  }
}

impl Default for FieldWeightTable {
  fn default() -> Self {
    Self::reference()
  }
}

/// Builder for [`FieldWeightTable`].
#[derive(Debug, Default)]
pub struct FieldWeightTableBuilder {
  entries: Vec<(RecordField, u32)>,
}

impl FieldWeightTableBuilder {
  /// Add a field with its weight. Fields are scored in the order added.
  pub fn field(mut self, field: RecordField, weight: u32) -> Self {
    self.entries.push((field, weight));
    self
  }

  /// Build the table, rejecting zero weights and repeated fields.
  pub fn build(self) -> Result<FieldWeightTable> {
    for (i, (field, weight)) in self.entries.iter().enumerate() {
      if *weight == 0 {
        return Err(SearchError::InvalidWeight(*field));
      }
      if self.entries[..i].iter().any(|(f, _)| f == field) {
        return Err(SearchError::DuplicateField(*field));
      }
    }

    Ok(FieldWeightTable {
      entries: self.entries,
    })
  }
}

/// Fields scanned for autocomplete suggestions.
///
/// Free-text fields are left out so suggestions stay short.
pub const SUGGESTION_FIELDS: [RecordField; 7] = [
  RecordField::Name,
  RecordField::Email,
  RecordField::Organization,
  RecordField::Service,
  RecordField::Subservice,
  RecordField::Region,
  RecordField::AgentName,
];

/// Fields used by [`simple_search`](crate::simple_search) when none are given.
pub const SIMPLE_SEARCH_FIELDS: [RecordField; 3] = [
  RecordField::Name,
  RecordField::Email,
  RecordField::Organization,
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reference_bounds() {
    let table = FieldWeightTable::reference();
    assert_eq!(table.weight(RecordField::Name), Some(10));
    assert_eq!(table.weight(RecordField::Source), Some(1));
    assert_eq!(table.weight(RecordField::CreatedAt), None);
    assert!(table.iter().all(|(_, w)| w > 0));
    assert_eq!(table.fields().next(), Some(RecordField::Name));
  }

  #[test]
  fn test_builder_rejects_zero_weight() {
    let err = FieldWeightTable::builder()
      .field(RecordField::Name, 0)
      .build()
      .unwrap_err();
    assert!(matches!(err, SearchError::InvalidWeight(RecordField::Name)));
  }

  #[test]
  fn test_builder_rejects_duplicates() {
    let err = FieldWeightTable::builder()
      .field(RecordField::Email, 3)
      .field(RecordField::Name, 4)
      .field(RecordField::Email, 5)
      .build()
      .unwrap_err();
    assert!(matches!(err, SearchError::DuplicateField(RecordField::Email)));
  }

  #[test]
  fn test_deserialize_validates_entries() {
    let duplicated = serde_json::from_str::<FieldWeightTable>(r#"[["name", 5], ["name", 5]]"#);
    assert!(duplicated.is_err());

    let zero = serde_json::from_str::<FieldWeightTable>(r#"[["name", 5], ["email", 0]]"#);
    assert!(zero.is_err());

    let table: FieldWeightTable = serde_json::from_str(r#"[["email", 3], ["name", 9]]"#).unwrap();
    assert_eq!(table.weight(RecordField::Name), Some(9));
    assert_eq!(table.fields().next(), Some(RecordField::Email));
  }

  #[test]
  fn test_serialize_round_trips_through_builder() {
    let json = serde_json::to_string(&FieldWeightTable::reference()).unwrap();
    let table: FieldWeightTable = serde_json::from_str(&json).unwrap();
    assert_eq!(table, FieldWeightTable::reference());
  }

  #[test]
  fn test_builder_keeps_order() {
    let table = FieldWeightTable::builder()
      .field(RecordField::Region, 2)
      .field(RecordField::Name, 9)
      .build()
      .unwrap();
    let fields: Vec<_> = table.fields().collect();
    assert_eq!(fields, vec![RecordField::Region, RecordField::Name]);
  }
}
