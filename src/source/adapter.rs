//! Defines the `RecordSource` trait for the data service that supplies records.

use crate::error::Result;
use crate::filter::FilterExpr;
use crate::record::SearchRecord;
use crate::source::scope::Principal;
use serde::{Deserialize, Serialize};

/// A trait that defines the contract of the host application's data service.
///
/// Search never calls a source itself: callers list records here and pass
/// them to the [`SearchEngine`](crate::engine::SearchEngine). Implementations
/// may wrap an HTTP client or a database; [`InMemorySource`] is provided for
/// tests and demos.
///
/// [`InMemorySource`]: crate::source::InMemorySource
pub trait RecordSource: Send + Sync {
  /// Lists the records matching `request.filter`, paginated by
  /// `request.skip` and `request.limit`.
  ///
  /// # Returns
  ///
  /// A `Result` containing the matching records in the source's natural order.
  fn list(&self, request: &ListRequest) -> Result<Vec<SearchRecord>>;
}

/// Filter and pagination parameters for [`RecordSource::list`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRequest {
  /// Only records satisfying this expression are listed.
  #[serde(default)]
  pub filter: Option<FilterExpr>,
  /// The number of matching records to skip.
  #[serde(default)]
  pub skip: usize,
  /// The maximum number of records to return. `0` means no limit.
  #[serde(default = "default_limit")]
  pub limit: usize,
}

/// Returns the default page size.
fn default_limit() -> usize {
  20
}

impl Default for ListRequest {
  fn default() -> Self {
    Self {
      filter: None,
      skip: 0,
      limit: default_limit(),
    }
  }
}

impl ListRequest {
  /// Sets the filter expression.
  pub fn filter(mut self, filter: FilterExpr) -> Self {
    self.filter = Some(filter);
    self
  }

  /// Sets the `skip` value for pagination.
  pub fn skip(mut self, skip: usize) -> Self {
    self.skip = skip;
    self
  }

  /// Sets the page size. `0` lists everything.
  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  /// Restricts the request to what `principal` may see, AND-ing its scope
  /// onto any existing filter.
  pub fn scoped(mut self, principal: &Principal) -> Self {
    if let Some(scope) = principal.scope_filter() {
      self.filter = Some(match self.filter.take() {
        Some(existing) => existing.and(scope),
        None => scope,
      });
    }
    self
  }

  /// Whether `record` passes the filter. No filter passes everything.
  pub fn matches(&self, record: &SearchRecord) -> bool {
    self.filter.as_ref().map_or(true, |f| f.evaluate(record))
  }
}
