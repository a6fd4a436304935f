//! PostgreSQL push-down for sort and page operations
//!
//! [`SqlQuery`] renders the same deferred operations as [`MemoryQuery`]
//! into an `ORDER BY ... LIMIT ... OFFSET ...` tail on a caller-supplied
//! base statement. Column names come from registered schemas only, never
//! from the raw sort string.
//!
//! An ordering recorded after a page window sorts that page only. The paged
//! statement becomes a derived table aliased as the element's relation:
//!
//! ```text
//! SELECT * FROM (<base> ORDER BY ... LIMIT $1 OFFSET $2) AS p ORDER BY p.name ASC NULLS LAST
//! ```
//!
//! Only columns of that relation are in scope of the outer statement.
//!
//! [`MemoryQuery`]: super::MemoryQuery

use super::sequence::Sequence;
use super::sorting::{CompositeOrder, Sortable};
use crate::error::{QueryError, Result};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, Postgres, QueryBuilder};
use std::fmt;
use tracing::debug;

enum Source<T> {
    Statement(String),
    Page(Box<SqlQuery<T>>),
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Source::Statement(sql) => Source::Statement(sql.clone()),
            Source::Page(inner) => Source::Page(inner.clone()),
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Statement(sql) => f.debug_tuple("Statement").field(sql).finish(),
            Source::Page(inner) => f.debug_tuple("Page").field(inner).finish(),
        }
    }
}

/// Deferred SQL statement over rows of `T`
pub struct SqlQuery<T> {
    source: Source<T>,
    order: Option<CompositeOrder<T>>,
    offset: usize,
    limit: Option<usize>,
}

impl<T> fmt::Debug for SqlQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlQuery")
            .field("source", &self.source)
            .field("order", &self.order)
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T> Clone for SqlQuery<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            order: self.order.clone(),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

impl<T: Sortable> SqlQuery<T> {
    /// Wrap a base statement such as
    /// `SELECT p.* FROM products p LEFT JOIN categories c ON c.id = p.category_id`.
    ///
    /// The statement must expose the relations named by `T`'s schema (and the
    /// schemas of nested types) so that resolved columns are in scope.
    pub fn new(base: impl Into<String>) -> Self {
        Self::over(Source::Statement(base.into()))
    }

    /// Select every row of `T`'s table, aliased as its relation when the two
    /// differ: `SELECT * FROM categories AS c`
    pub fn from_schema() -> Self {
        let schema = T::schema();

        if schema.table() == schema.relation() {
            Self::new(format!("SELECT * FROM {}", schema.table()))
        } else {
            Self::new(format!(
                "SELECT * FROM {} AS {}",
                schema.table(),
                schema.relation()
            ))
        }
    }

    fn over(source: Source<T>) -> Self {
        Self {
            source,
            order: None,
            offset: 0,
            limit: None,
        }
    }

    fn has_window(&self) -> bool {
        self.offset > 0 || self.limit.is_some()
    }

    /// Build the statement with bound `LIMIT`/`OFFSET` parameters.
    ///
    /// Fails when an ordering recorded after a page window names a column
    /// outside the paged relation.
    pub fn to_builder(&self) -> Result<QueryBuilder<'static, Postgres>> {
        let mut sql_builder = QueryBuilder::<Postgres>::new(String::new());
        self.push_statement(&mut sql_builder)?;
        Ok(sql_builder)
    }

    fn push_statement(&self, sql_builder: &mut QueryBuilder<'static, Postgres>) -> Result<()> {
        match &self.source {
            Source::Statement(base) => {
                sql_builder.push(base);
            }
            Source::Page(inner) => {
                let relation = T::schema().relation();
                if let Some(key) = self
                    .order
                    .iter()
                    .flat_map(|order| order.keys())
                    .find(|key| !in_relation(key.column(), relation))
                {
                    return Err(QueryError::InvalidArgument(format!(
                        "cannot order a page of '{}' by '{}': column '{}' is not in scope",
                        relation,
                        key.path(),
                        key.column()
                    )));
                }

                sql_builder.push("SELECT * FROM (");
                inner.push_statement(sql_builder)?;
                sql_builder.push(") AS ");
                sql_builder.push(relation);
            }
        }

        // Add sorting
        if let Some(order) = self.order.as_ref().filter(|order| !order.is_empty()) {
            sql_builder.push(" ORDER BY ");
            for (i, key) in order.keys().iter().enumerate() {
                if i > 0 {
                    sql_builder.push(", ");
                }
                sql_builder.push(key.column());
                // Nulls compare greater than any value, matching in-memory ordering
                if key.direction().is_descending() {
                    sql_builder.push(" DESC NULLS FIRST");
                } else {
                    sql_builder.push(" ASC NULLS LAST");
                }
            }
        }

        // Add pagination
        if let Some(limit) = self.limit {
            sql_builder.push(" LIMIT ");
            sql_builder.push_bind(to_i64(limit));
        }
        if self.has_window() {
            sql_builder.push(" OFFSET ");
            sql_builder.push_bind(to_i64(self.offset));
        }

        Ok(())
    }

    /// Rendered SQL with `$n` placeholders
    pub fn sql(&self) -> Result<String> {
        Ok(self.to_builder()?.sql().to_string())
    }

    /// Execute the statement and map each row into `T`
    pub async fn fetch_all<'c, E>(&self, executor: E) -> Result<Vec<T>>
    where
        E: PgExecutor<'c>,
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut sql_builder = self.to_builder()?;
        debug!("Executing sorted query: {}", sql_builder.sql());

        let rows = sql_builder
            .build_query_as::<T>()
            .fetch_all(executor)
            .await?;

        Ok(rows)
    }
}

fn in_relation(column: &str, relation: &str) -> bool {
    match column.split_once('.') {
        Some((qualifier, _)) => qualifier == relation,
        None => true,
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl<T: Sortable> Sequence for SqlQuery<T> {
    type Item = T;

    /// Earlier keys are kept after the new ones as tie-breakers. After a
    /// page window the windowed statement is wrapped so the new order sorts
    /// that page only.
    fn order_by(self, order: CompositeOrder<T>) -> Self {
        if order.is_empty() {
            return self;
        }

        if self.has_window() {
            let relation = T::schema().relation();
            let tie_break: Vec<_> = self
                .order
                .iter()
                .flat_map(|previous| previous.keys())
                .filter(|key| in_relation(key.column(), relation))
                .cloned()
                .collect();
            debug!("Ordering a page of {} as a derived table", relation);

            let mut outer = Self::over(Source::Page(Box::new(self)));
            outer.order = Some(order.then(tie_break));
            return outer;
        }

        let mut query = self;
        query.order = Some(match query.order.take() {
            Some(previous) => order.then(previous.keys().iter().cloned()),
            None => order,
        });
        query
    }

    fn skip(mut self, count: usize) -> Self {
        self.offset = self.offset.saturating_add(count);
        self.limit = self.limit.map(|limit| limit.saturating_sub(count));
        self
    }

    fn take(mut self, count: usize) -> Self {
        self.limit = Some(self.limit.map_or(count, |limit| limit.min(count)));
        self
    }
}
