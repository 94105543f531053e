//! EMS Search - weighted lead search for the EMS lead manager.
//!
//! Ranks visitor and lead records by a weighted multi-field relevance score,
//! produces autocomplete suggestions, highlights matches, and keeps a plain
//! substring filter for callers that do not need ranking. Records are fetched
//! by the caller (see [`source`]) and passed in; search itself does no I/O.

pub mod engine;
pub mod error;
pub mod filter;
pub mod record;
pub mod searchers;
pub mod source;
pub mod types;
pub mod weights;

pub use engine::{enhanced_search, get_search_suggestions, search_with_highlighting, simple_search};

pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::engine::*;
    pub use crate::error::SearchError;
    pub use crate::filter::*;
    pub use crate::record::*;
    pub use crate::searchers::{HighlightedField, HighlightedResult, Segment};
    pub use crate::source::*;
    pub use crate::types::*;
    pub use crate::weights::*;
}
