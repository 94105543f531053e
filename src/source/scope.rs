//! Role-based scoping of listed records.

use crate::error::SearchError;
use crate::filter::{CompareOp, FilterExpr};
use crate::record::RecordField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The roles of the lead manager's dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
  /// Sees every record.
  Admin,
  /// Sees records where they are the sales executive.
  SalesExecutive,
  /// Sees records assigned to them.
  CustomerExecutive,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Admin => "admin",
      Role::SalesExecutive => "sales-executive",
      Role::CustomerExecutive => "customer-executive",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = SearchError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "admin" => Ok(Role::Admin),
      "sales-executive" => Ok(Role::SalesExecutive),
      "customer-executive" => Ok(Role::CustomerExecutive),
      other => Err(SearchError::UnknownRole(other.to_string())),
    }
  }
}

/// An authenticated user, as produced by the host application's auth gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
  pub user_id: String,
  pub role: Role,
}

impl Principal {
  pub fn new(user_id: impl Into<String>, role: Role) -> Self {
    Self {
      user_id: user_id.into(),
      role,
    }
  }

  /// The filter restricting records to this principal, or `None` for admins.
  ///
  /// Ids are matched exactly: no case folding, no numeric coercion.
  pub fn scope_filter(&self) -> Option<FilterExpr> {
    let field = match self.role {
      Role::Admin => return None,
      Role::SalesExecutive => RecordField::SalesExecutive,
      Role::CustomerExecutive => RecordField::AssignedAgent,
    };
    Some(FilterExpr::compare(field, CompareOp::Is, self.user_id.as_str()))
  }
}
