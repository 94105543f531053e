//! The search operations behind [`SearchEngine`](crate::engine::SearchEngine).
//!
//! - [`scorer`]: weighted multi-field relevance score for one record.
//! - [`suggest`]: autocomplete suggestions for a partial query.
//! - [`simple`]: unranked substring filter.
//! - [`highlight`]: match segments for ranked results.
//!
//! # Example
//!
//! ```rust
//! use ems_search::prelude::*;
//! use ems_search::searchers::scorer::calculate_search_score;
//! use ems_search::searchers::tokenizer::PreparedQuery;
//!
//! let record = SearchRecord::new().with(RecordField::Organization, "TechCorp Inc");
//! let fields: Vec<_> = FieldWeightTable::reference().iter().collect();
//!
//! let score = calculate_search_score(&record, &PreparedQuery::new("tech", false), &fields);
//! assert_eq!(score.matched_fields, vec![RecordField::Organization]);
//! ```

pub mod highlight;
pub mod scorer;
pub mod simple;
pub mod suggest;
pub mod tokenizer;

pub use highlight::{HighlightedField, HighlightedResult, Segment};
pub use scorer::calculate_search_score;
pub use simple::simple_search;
pub use suggest::get_search_suggestions;
