//! Sorting module for string-driven multi-key ordering
//!
//! This module provides:
//! - Sort string parsing into a `SortSpec`
//! - Registered per-type schemas that resolve property paths
//! - Sort key values with natural ordering and nulls last
//! - Composite "then by" ordering for any `Sequence`

pub mod order;
pub mod parse;
pub mod schema;
pub mod utils;
pub mod value;


pub use order::*;
pub use parse::*;
pub use schema::*;
pub use value::*;
