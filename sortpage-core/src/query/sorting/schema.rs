//! Registered property schemas and property path resolution
//!
//! A [`Schema`] is the name → accessor map of one element type. It is built
//! once per type (typically in a `once_cell::sync::Lazy` static) and resolves
//! dot-separated property paths such as `Category.Name` into a typed key
//! accessor plus the column expression used for SQL push-down.

use super::utils::{short_type_name, to_snake_case};
use super::value::{SortField, SortValue, ValueType};
use crate::error::{QueryError, Result};
use std::fmt;
use std::sync::Arc;

/// Element types that can be ordered by property path
pub trait Sortable: Sized + 'static {
    /// The registered schema for this type
    fn schema() -> &'static Schema<Self>;
}

/// Extracts the sort key of one property path from an element
pub type KeyFn<T> = Arc<dyn Fn(&T) -> SortValue + Send + Sync>;

type ResolveFn<T> = Box<dyn Fn(&[&str]) -> Result<ResolvedPath<T>> + Send + Sync>;

/// Property path bound against a schema
pub struct ResolvedPath<T> {
    key: KeyFn<T>,
    value_type: ValueType,
    column: String,
}

impl<T> ResolvedPath<T> {
    /// Key for one element; absent nested references yield `SortValue::Null`
    #[inline]
    pub fn key(&self, item: &T) -> SortValue {
        (self.key)(item)
    }

    /// Storage kind of the key
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Qualified column expression, e.g. `categories.name`
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl<T> Clone for ResolvedPath<T> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            value_type: self.value_type,
            column: self.column.clone(),
        }
    }
}

impl<T> fmt::Debug for ResolvedPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedPath")
            .field("value_type", &self.value_type)
            .field("column", &self.column)
            .finish()
    }
}

enum PropertyKind<T> {
    Value {
        value_type: ValueType,
        field_type: String,
        column: String,
        key: KeyFn<T>,
    },
    Nested {
        type_name: fn() -> &'static str,
        resolve: ResolveFn<T>,
    },
}

struct Property<T> {
    name: &'static str,
    kind: PropertyKind<T>,
}

/// Name → accessor map for one element type
pub struct Schema<T> {
    type_name: &'static str,
    table: String,
    relation: String,
    properties: Vec<Property<T>>,
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.properties.iter().map(|p| p.name).collect();

        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("table", &self.table)
            .field("relation", &self.relation)
            .field("properties", &names)
            .finish()
    }
}

impl<T: 'static> Schema<T> {
    /// Start a schema for the type called `type_name`.
    ///
    /// The SQL table and relation both default to the snake_case type name.
    pub fn builder(type_name: &'static str) -> SchemaBuilder<T> {
        let table = to_snake_case(type_name);

        SchemaBuilder {
            schema: Schema {
                type_name,
                relation: table.clone(),
                table,
                properties: Vec::new(),
            },
        }
    }

    /// Name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Table the rows of this type are stored in
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Table name or alias that qualifies this type's columns
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Registered property names in registration order
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|p| p.name)
    }

    /// Resolve a dot-separated property path.
    ///
    /// Each segment is matched case-insensitively against the properties of
    /// the type reached so far. Errors name the failing segment and the type
    /// it was searched on.
    pub fn resolve(&self, path: &str) -> Result<ResolvedPath<T>> {
        let segments: Vec<&str> = path.split('.').map(str::trim).collect();
        self.resolve_segments(&segments)
    }

    fn resolve_segments(&self, segments: &[&str]) -> Result<ResolvedPath<T>> {
        let Some((head, rest)) = segments.split_first() else {
            return Err(QueryError::InvalidArgument(
                "property path must not be empty".to_string(),
            ));
        };

        let property = self.find(head).ok_or_else(|| QueryError::PropertyNotFound {
            property: head.to_string(),
            type_name: self.type_name.to_string(),
        })?;

        match &property.kind {
            PropertyKind::Value {
                value_type,
                field_type,
                column,
                key,
            } => match rest.first() {
                // Scalar values have no members of their own
                Some(next) => Err(QueryError::PropertyNotFound {
                    property: next.to_string(),
                    type_name: field_type.clone(),
                }),
                None => Ok(ResolvedPath {
                    key: Arc::clone(key),
                    value_type: *value_type,
                    column: format!("{}.{}", self.relation, column),
                }),
            },
            PropertyKind::Nested { type_name, resolve } => {
                if rest.is_empty() {
                    Err(QueryError::NotOrderable {
                        property: property.name.to_string(),
                        type_name: type_name().to_string(),
                    })
                } else {
                    resolve(rest)
                }
            }
        }
    }

    fn find(&self, segment: &str) -> Option<&Property<T>> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(segment))
    }
}

fn schema_type_name<C: Sortable>() -> &'static str {
    C::schema().type_name()
}

/// Builder for [`Schema`]
pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T> fmt::Debug for SchemaBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaBuilder").field(&self.schema).finish()
    }
}

impl<T: 'static> SchemaBuilder<T> {
    /// Set the table the rows are selected from
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.schema.table = table.into();
        self
    }

    /// Override the table name or alias used to qualify columns
    pub fn relation(mut self, relation: impl Into<String>) -> Self {
        self.schema.relation = relation.into();
        self
    }

    /// Register a value property whose column is the snake_case name
    pub fn field<V, F>(self, name: &'static str, get: F) -> Self
    where
        V: SortField,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let column = to_snake_case(name);
        self.field_with_column(name, column, get)
    }

    /// Register a value property stored under an explicit column name
    pub fn field_with_column<V, F>(
        mut self,
        name: &'static str,
        column: impl Into<String>,
        get: F,
    ) -> Self
    where
        V: SortField,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.schema.properties.push(Property {
            name,
            kind: PropertyKind::Value {
                value_type: V::VALUE_TYPE,
                field_type: short_type_name(std::any::type_name::<V>()),
                column: column.into(),
                key: Arc::new(move |item: &T| get(item).into_sort_value()),
            },
        });
        self
    }

    /// Register a reference to another sortable type.
    ///
    /// The referenced schema is looked up only when a path is resolved, so
    /// self-referencing types are fine.
    pub fn nested<C, F>(mut self, name: &'static str, get: F) -> Self
    where
        C: Sortable,
        F: for<'a> Fn(&'a T) -> Option<&'a C> + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let resolve = move |rest: &[&str]| -> Result<ResolvedPath<T>> {
            let inner = C::schema().resolve_segments(rest)?;
            let get = Arc::clone(&get);
            let inner_key = Arc::clone(&inner.key);

            Ok(ResolvedPath {
                key: Arc::new(move |item: &T| {
                    get(item)
                        .map(|child| inner_key(child))
                        .unwrap_or(SortValue::Null)
                }),
                value_type: inner.value_type,
                column: inner.column,
            })
        };

        self.schema.properties.push(Property {
            name,
            kind: PropertyKind::Nested {
                type_name: schema_type_name::<C>,
                resolve: Box::new(resolve),
            },
        });
        self
    }

    /// Finish the schema
    pub fn build(self) -> Schema<T> {
        self.schema
    }
}
