//! In-memory record source.

use crate::error::{Result, SearchError};
use crate::record::SearchRecord;
use crate::source::adapter::{ListRequest, RecordSource};
use tracing::debug;

/// In-memory record source keeping insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<SearchRecord>,
}

impl InMemorySource {
    /// Create a source over the given records.
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    /// Append a record.
    pub fn push(&mut self, record: SearchRecord) {
        self.records.push(record);
    }

    /// Find a record by id.
    pub fn get(&self, id: &str) -> Option<&SearchRecord> {
        self.records.iter().find(|r| r.id.as_deref() == Some(id))
    }

    /// Remove a record by id, returning it.
    pub fn remove(&mut self, id: &str) -> Result<SearchRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| SearchError::RecordNotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, unfiltered.
    pub fn all(&self) -> &[SearchRecord] {
        &self.records
    }
}

impl RecordSource for InMemorySource {
    fn list(&self, request: &ListRequest) -> Result<Vec<SearchRecord>> {
        let limit = if request.limit == 0 {
            usize::MAX
        } else {
            request.limit
        };

        let page: Vec<SearchRecord> = self
            .records
            .iter()
            .filter(|r| request.matches(r))
            .skip(request.skip)
            .take(limit)
            .cloned()
            .collect();

        debug!("Listed {} of {} records", page.len(), self.records.len());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterExpr;
    use crate::record::RecordField;

    fn source() -> InMemorySource {
        InMemorySource::new(
            (0..5)
                .map(|i| {
                    SearchRecord::new()
                        .with(RecordField::Id, format!("lead-{i}"))
                        .with(RecordField::Status, if i % 2 == 0 { "new" } else { "won" })
                })
                .collect(),
        )
    }

    #[test]
    fn test_list_filters_then_paginates() {
        let request = ListRequest::default()
            .filter(FilterExpr::equals(RecordField::Status, "new"))
            .skip(1)
            .limit(1);
        let page = source().list(&request).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id.as_deref(), Some("lead-2"));
    }

    #[test]
    fn test_zero_limit_lists_everything() {
        let page = source().list(&ListRequest::default().limit(0)).unwrap();
        assert_eq!(page.len(), 5);
    }

    #[test]
    fn test_get_and_remove() {
        let mut source = source();
        assert!(source.get("lead-3").is_some());
        assert!(source.get("lead-9").is_none());

        let removed = source.remove("lead-3").unwrap();
        assert_eq!(removed.id.as_deref(), Some("lead-3"));
        assert_eq!(source.len(), 4);
        let ids: Vec<_> = source.all().iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec!["lead-0", "lead-1", "lead-2", "lead-4"]);
        assert!(matches!(
            source.remove("lead-3"),
            Err(SearchError::RecordNotFound(id)) if id == "lead-3"
        ));
    }
}
