//! Sorting, pagination and the sequences they apply to

pub mod pagination;
pub mod prelude;
pub mod sequence;
pub mod sorting;
#[cfg(feature = "postgres")]
pub mod sql;

pub use pagination::{apply_page, paginate};
pub use sequence::{AsQuery, MemoryQuery, Sequence};
pub use sorting::*;
#[cfg(feature = "postgres")]
pub use sql::SqlQuery;

use crate::error::Result;
use sortpage_model::{PageRequest, SortSpec};

/// Method-call form of the sort and page operations for every [`Sequence`]
pub trait QueryableExt: Sequence {
    /// See [`order_by_expression`]
    fn order_by_expression(self, sort: &str) -> Result<Self> {
        sorting::order_by_expression(self, sort)
    }

    /// See [`apply_sort_spec`]
    fn order_by_spec(self, spec: &SortSpec) -> Result<Self> {
        sorting::apply_sort_spec(self, spec)
    }

    /// See [`paginate`]
    fn paginate(self, page_number: i64, page_size: i64) -> Self {
        pagination::paginate(self, page_number, page_size)
    }

    /// See [`apply_page`]
    fn page(self, page: PageRequest) -> Self {
        pagination::apply_page(self, page)
    }
}

impl<Q: Sequence> QueryableExt for Q {}
