//! Commonly used query types and traits for easy importing

pub use super::{
    AsQuery, CompositeOrder, MemoryQuery, QueryableExt, Schema, Sequence, SortField,
    SortValue, Sortable, ValueType,
};
#[cfg(feature = "postgres")]
pub use super::SqlQuery;
pub use crate::error::{QueryError, Result};
pub use sortpage_model::{PageRequest, SortDirection, SortSpec, SortTerm};
