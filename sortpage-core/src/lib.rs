//! # sortpage-core
//!
//! String-driven multi-key sorting and page slicing for strongly typed
//! sequences.
//!
//! ## Overview
//!
//! HTTP layers receive sort and page parameters as plain strings. This crate
//! turns them into orderings over any type that registers a property
//! [`Schema`](query::Schema):
//!
//! - **Parsing**: `Category.Name:asc, Name:desc` becomes a [`SortSpec`]
//! - **Resolution**: property paths are bound case-insensitively against the
//!   element type's schema, nested types included
//! - **Ordering**: a stable composite order with per-term direction
//! - **Pagination**: 1-based page windows as lazy skip/take
//! - **Backends**: deferred in-memory execution ([`MemoryQuery`](query::MemoryQuery))
//!   and PostgreSQL push-down (`SqlQuery`, feature `postgres`)
//!
//! ## Feature Flags
//!
//! - `postgres` (default): SQL rendering and execution through `sqlx`
//!
//! ## Examples
//!
//! ```
//! use once_cell::sync::Lazy;
//! use sortpage_core::query::prelude::*;
//!
//! struct Category {
//!     name: String,
//! }
//!
//! impl Sortable for Category {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: Lazy<Schema<Category>> = Lazy::new(|| {
//!             Schema::builder("Category")
//!                 .field("Name", |c: &Category| c.name.clone())
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let categories = vec![
//!     Category { name: "B".into() },
//!     Category { name: "A".into() },
//! ];
//!
//! let names: Vec<String> = categories
//!     .as_query()
//!     .order_by_expression("name:desc")?
//!     .paginate(1, 10)
//!     .into_iter()
//!     .map(|c| c.name)
//!     .collect();
//!
//! assert_eq!(names, ["B", "A"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod params;
pub mod query;

pub use config::QueryConfig;
pub use error::{QueryError, Result};
pub use params::ListParams;
pub use query::{
    MemoryQuery, QueryableExt, Schema, Sequence, Sortable, apply_page, apply_sort_spec,
    order_by_expression, paginate, parse_sort_spec,
};
#[cfg(feature = "postgres")]
pub use query::SqlQuery;
pub use sortpage_model::{PageRequest, SortDirection, SortSpec, SortTerm};
