//! Composite multi-key ordering
//!
//! A [`CompositeOrder`] is the resolved form of a [`SortSpec`]: one key
//! accessor and direction per term. The first key is the primary order and
//! every later key only breaks ties left by the keys before it.

use super::parse::parse_sort_spec;
use super::schema::{ResolvedPath, Sortable};
use super::value::SortValue;
use crate::error::Result;
use crate::query::sequence::Sequence;
use sortpage_model::{SortDirection, SortSpec};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// One resolved sort term
pub struct OrderKey<T> {
    path: String,
    resolved: ResolvedPath<T>,
    direction: SortDirection,
}

impl<T> OrderKey<T> {
    /// Property path as written in the sort string
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Direction of this key
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Accessor and column the path resolved to
    pub fn resolved(&self) -> &ResolvedPath<T> {
        &self.resolved
    }

    /// Qualified column expression for push-down
    pub fn column(&self) -> &str {
        self.resolved.column()
    }
}

impl<T> Clone for OrderKey<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            resolved: self.resolved.clone(),
            direction: self.direction,
        }
    }
}

impl<T> fmt::Debug for OrderKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderKey")
            .field("path", &self.path)
            .field("direction", &self.direction)
            .field("resolved", &self.resolved)
            .finish()
    }
}

/// Multi-key order with "then by" semantics
pub struct CompositeOrder<T> {
    keys: Vec<OrderKey<T>>,
}

impl<T> Clone for CompositeOrder<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<T> fmt::Debug for CompositeOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys.iter()).finish()
    }
}

impl<T: Sortable> CompositeOrder<T> {
    /// Resolve every term of `spec` against `T`'s schema.
    ///
    /// All terms are resolved before anything is returned, so a bad path
    /// anywhere in `spec` fails the whole call.
    pub fn from_spec(spec: &SortSpec) -> Result<Self> {
        let schema = T::schema();
        let keys = spec
            .iter()
            .map(|term| -> Result<OrderKey<T>> {
                Ok(OrderKey {
                    path: term.path.clone(),
                    resolved: schema.resolve(&term.path)?,
                    direction: term.direction,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { keys })
    }
}

impl<T> CompositeOrder<T> {
    /// Resolved keys, primary first
    pub fn keys(&self) -> &[OrderKey<T>] {
        &self.keys
    }

    /// Append `tie_break` after the existing keys
    pub fn then(mut self, tie_break: impl IntoIterator<Item = OrderKey<T>>) -> Self {
        self.keys.extend(tie_break);
        self
    }

    /// True when no key was resolved
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Extract the key tuple of one element
    pub fn extract(&self, item: &T) -> Vec<SortValue> {
        self.keys.iter().map(|k| k.resolved.key(item)).collect()
    }

    /// Compare two key tuples produced by [`Self::extract`]
    pub fn compare_keys(&self, a: &[SortValue], b: &[SortValue]) -> Ordering {
        self.keys
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(key, (a, b))| a.compare_with_direction(b, key.direction))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Compare two elements directly
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.keys
            .iter()
            .map(|k| {
                k.resolved
                    .key(a)
                    .compare_with_direction(&k.resolved.key(b), k.direction)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable in-place sort.
    ///
    /// Keys are extracted once per element; elements equal on every key keep
    /// their relative input order.
    pub fn sort(&self, items: &mut Vec<T>) {
        if self.keys.is_empty() || items.len() < 2 {
            return;
        }

        let mut decorated: Vec<(Vec<SortValue>, T)> = items
            .drain(..)
            .map(|item| (self.extract(&item), item))
            .collect();

        decorated.sort_by(|a, b| self.compare_keys(&a.0, &b.0));

        items.extend(decorated.into_iter().map(|(_, item)| item));
    }
}

/// Order `source` by an already parsed spec.
///
/// An empty spec returns the source untouched without recording any ordering.
pub fn apply_sort_spec<Q: Sequence>(source: Q, spec: &SortSpec) -> Result<Q> {
    if spec.is_empty() {
        return Ok(source);
    }

    let order = CompositeOrder::<Q::Item>::from_spec(spec)?;
    debug!(
        "Applying {}-key order to {}: {}",
        order.keys().len(),
        <Q::Item as Sortable>::schema().type_name(),
        spec
    );

    Ok(source.order_by(order))
}

/// Order `source` by a raw sort string such as `Category.Name:asc, Name:desc`.
///
/// Parsing and path resolution happen here, before the sequence is
/// executed; configuration errors never surface at enumeration time.
pub fn order_by_expression<Q: Sequence>(source: Q, sort: &str) -> Result<Q> {
    let spec = parse_sort_spec(sort)?;
    apply_sort_spec(source, &spec)
}
