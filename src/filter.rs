//! Filter expressions for listing records from a data source.
//!
//! This module provides a small boolean AST that a [`RecordSource`]
//! evaluates against each record, mirroring the query filters the lead
//! manager's list endpoints accept (status, region, assignee and so on).
//!
//! [`RecordSource`]: crate::source::RecordSource

use crate::record::{RecordField, SearchRecord};
use serde::{Deserialize, Serialize};

/// An enum representing the nodes of a filter expression AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpr {
  /// A comparison between a field and a value, such as `status == "new"`.
  Compare {
    /// The record field to compare.
    field: RecordField,
    /// The comparison operator to use.
    op: CompareOp,
    /// The value to compare against.
    value: FilterValue,
  },
  /// True only if all sub-expressions are true. An empty list is true.
  And(Vec<FilterExpr>),
  /// True if at least one sub-expression is true. An empty list is false.
  Or(Vec<FilterExpr>),
  /// Inverts the sub-expression.
  Not(Box<FilterExpr>),
}

/// The set of comparison operators available for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
  /// Equal to (`==`)
  Eq,
  /// Not equal to (`!=`)
  Ne,
  /// Less than (`<`)
  Lt,
  /// Less than or equal to (`<=`)
  Le,
  /// Greater than (`>`)
  Gt,
  /// Greater than or equal to (`>=`)
  Ge,
  /// Substring containment
  Contains,
  /// Exact, case-sensitive text equality with no numeric coercion.
  /// Used for identifiers.
  Is,
}

/// Represents the possible types of values used in filter expressions.
///
/// Untagged, so JSON `"new"`, `12` and `true` deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
  /// A string value.
  String(String),
  /// A floating-point number value.
  Number(f64),
  /// A boolean value.
  Bool(bool),
}

impl From<&str> for FilterValue {
  fn from(value: &str) -> Self {
    FilterValue::String(value.to_string())
  }
}

impl From<String> for FilterValue {
  fn from(value: String) -> Self {
    FilterValue::String(value)
  }
}

impl From<f64> for FilterValue {
  fn from(value: f64) -> Self {
    FilterValue::Number(value)
  }
}

impl From<bool> for FilterValue {
  fn from(value: bool) -> Self {
    FilterValue::Bool(value)
  }
}

impl FilterExpr {
  /// Shorthand for a comparison node.
  pub fn compare(field: RecordField, op: CompareOp, value: impl Into<FilterValue>) -> Self {
    FilterExpr::Compare {
      field,
      op,
      value: value.into(),
    }
  }

  /// Shorthand for `field == value`.
  pub fn equals(field: RecordField, value: impl Into<FilterValue>) -> Self {
    Self::compare(field, CompareOp::Eq, value)
  }

  /// Combines `self` and `other` with AND, flattening nested ANDs.
  pub fn and(self, other: FilterExpr) -> Self {
    match self {
      FilterExpr::And(mut exprs) => {
        exprs.push(other);
        FilterExpr::And(exprs)
      }
      expr => FilterExpr::And(vec![expr, other]),
    }
  }

  /// Evaluates the expression against a record.
  ///
  /// Text comparisons ignore case, except `Is`. Values compare as numbers
  /// only when the field is numeric or the filter value is a number, and
  /// both sides are finite; otherwise they compare lexically, so ISO-8601
  /// timestamps order correctly. A missing field only satisfies `Ne`.
  pub fn evaluate(&self, record: &SearchRecord) -> bool {
    match self {
      FilterExpr::Compare { field, op, value } => match record.field_value(*field) {
        Some(actual) => compare(*field, &actual, *op, value),
        None => *op == CompareOp::Ne,
      },
      FilterExpr::And(exprs) => exprs.iter().all(|e| e.evaluate(record)),
      FilterExpr::Or(exprs) => exprs.iter().any(|e| e.evaluate(record)),
      FilterExpr::Not(expr) => !expr.evaluate(record),
    }
  }
}

fn compare(field: RecordField, actual: &str, op: CompareOp, expected: &FilterValue) -> bool {
  let expected_text = match expected {
    FilterValue::String(s) => s.clone(),
    FilterValue::Number(n) => n.to_string(),
    FilterValue::Bool(b) => b.to_string(),
  };

  let numeric = matches!(field, RecordField::Amount | RecordField::LeadScore)
    || matches!(expected, FilterValue::Number(_));
  let ordering = match (numeric, finite(actual), finite(&expected_text)) {
    (true, Some(a), Some(b)) => a.partial_cmp(&b),
    _ => Some(actual.to_lowercase().cmp(&expected_text.to_lowercase())),
  };

  match op {
    CompareOp::Eq => ordering == Some(std::cmp::Ordering::Equal),
    CompareOp::Ne => ordering != Some(std::cmp::Ordering::Equal),
    CompareOp::Lt => ordering == Some(std::cmp::Ordering::Less),
    CompareOp::Le => matches!(ordering, Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)),
    CompareOp::Gt => ordering == Some(std::cmp::Ordering::Greater),
    CompareOp::Ge => matches!(
      ordering,
      Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
    ),
    CompareOp::Contains => actual
      .to_lowercase()
      .contains(&expected_text.to_lowercase()),
    CompareOp::Is => actual == expected_text,
  }
}

fn finite(text: &str) -> Option<f64> {
  text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lead() -> SearchRecord {
    SearchRecord {
      status: Some("Qualified".to_string()),
      region: Some("North".to_string()),
      amount: Some(1500.0),
      ..Default::default()
    }
  }

  #[test]
  fn test_eq_ignores_case() {
    assert!(FilterExpr::equals(RecordField::Status, "qualified").evaluate(&lead()));
    assert!(!FilterExpr::equals(RecordField::Status, "new").evaluate(&lead()));
  }

  #[test]
  fn test_numeric_comparison() {
    let over = FilterExpr::compare(RecordField::Amount, CompareOp::Gt, 1000.0);
    let under = FilterExpr::compare(RecordField::Amount, CompareOp::Lt, 200.0);
    assert!(over.evaluate(&lead()));
    assert!(!under.evaluate(&lead()));
    // "1500" vs "200" would order the other way lexically.
    assert!(FilterExpr::compare(RecordField::Amount, CompareOp::Ge, "200").evaluate(&lead()));
  }

  #[test]
  fn test_number_like_names_compare_as_text() {
    for name in ["Nan", "inf", "Infinity", "1e3"] {
      let record = SearchRecord::new().with(RecordField::Name, name);
      assert!(FilterExpr::equals(RecordField::Name, name.to_uppercase()).evaluate(&record));
      assert!(!FilterExpr::compare(RecordField::Name, CompareOp::Ne, name).evaluate(&record));
    }
    let record = SearchRecord::new().with(RecordField::Name, "1e3");
    assert!(!FilterExpr::equals(RecordField::Name, "1000").evaluate(&record));
  }

  #[test]
  fn test_number_value_compares_numerically_on_text_field() {
    let record = SearchRecord::new().with(RecordField::Priority, "10");
    assert!(FilterExpr::compare(RecordField::Priority, CompareOp::Gt, 9.0).evaluate(&record));
    assert!(!FilterExpr::compare(RecordField::Priority, CompareOp::Gt, "9").evaluate(&record));
  }

  #[test]
  fn test_is_is_exact() {
    let record = SearchRecord::new().with(RecordField::SalesExecutive, "se-1");
    assert!(FilterExpr::compare(RecordField::SalesExecutive, CompareOp::Is, "se-1").evaluate(&record));
    assert!(!FilterExpr::compare(RecordField::SalesExecutive, CompareOp::Is, "SE-1").evaluate(&record));

    let numeric = SearchRecord::new().with(RecordField::SalesExecutive, "1e3");
    assert!(!FilterExpr::compare(RecordField::SalesExecutive, CompareOp::Is, "1000").evaluate(&numeric));
  }

  #[test]
  fn test_missing_field_only_satisfies_ne() {
    let record = lead();
    assert!(FilterExpr::compare(RecordField::Source, CompareOp::Ne, "web").evaluate(&record));
    assert!(!FilterExpr::equals(RecordField::Source, "web").evaluate(&record));
    assert!(!FilterExpr::compare(RecordField::Source, CompareOp::Contains, "").evaluate(&record));
  }

  #[test]
  fn test_boolean_combinators() {
    let record = lead();
    let north_and_qualified = FilterExpr::equals(RecordField::Region, "north")
      .and(FilterExpr::equals(RecordField::Status, "qualified"));
    assert!(north_and_qualified.evaluate(&record));
    assert!(FilterExpr::And(vec![]).evaluate(&record));
    assert!(!FilterExpr::Or(vec![]).evaluate(&record));
    assert!(!FilterExpr::Not(Box::new(north_and_qualified)).evaluate(&record));
  }

  #[test]
  fn test_and_flattens() {
    let expr = FilterExpr::equals(RecordField::Region, "north")
      .and(FilterExpr::equals(RecordField::Status, "new"))
      .and(FilterExpr::equals(RecordField::Source, "web"));
    match expr {
      FilterExpr::And(exprs) => assert_eq!(exprs.len(), 3),
      other => panic!("expected And, got {other:?}"),
    }
  }

  #[test]
  fn test_deserialize_untagged_values() {
    let json = r#"{"Compare": {"field": "amount", "op": "Ge", "value": 1000}}"#;
    let expr: FilterExpr = serde_json::from_str(json).unwrap();
    assert!(expr.evaluate(&lead()));
  }
}
