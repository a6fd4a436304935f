//! Plain sort and page request models shared across sortpage crates.

pub mod page;
pub mod sort;

pub use page::PageRequest;
pub use sort::{SortDirection, SortSpec, SortTerm};
