//! Record sources and role scoping for the records fed into search.

pub mod adapter;
pub mod memory;
pub mod scope;

pub use adapter::{ListRequest, RecordSource};
pub use memory::InMemorySource;
pub use scope::{Principal, Role};
