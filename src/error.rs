//! Error types for the search crate.
//!
//! Ranking, suggestion and highlighting never fail. Errors only come from
//! building configuration and from record sources.

use crate::record::RecordField;
use thiserror::Error;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while configuring search or listing records.
#[derive(Debug, Error)]
pub enum SearchError {
  /// A field weight of zero was supplied.
  #[error("weight for field `{0}` must be positive")]
  InvalidWeight(RecordField),

  /// The same field was listed twice in a weight table.
  #[error("field `{0}` appears more than once in the weight table")]
  DuplicateField(RecordField),

  /// Search options could not be parsed.
  #[error("invalid search options: {0}")]
  InvalidOptions(#[from] serde_json::Error),

  /// A role name did not match any known role.
  #[error("unknown role: {0}")]
  UnknownRole(String),

  /// No record with the given id exists in the source.
  #[error("record not found: {0}")]
  RecordNotFound(String),
}
