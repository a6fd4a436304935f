//! Deferred sequence abstraction
//!
//! A [`Sequence`] records ordering and slicing operations without running
//! them. [`MemoryQuery`] executes over any iterator when enumerated;
//! `SqlQuery` (feature `postgres`) renders the same operations as SQL.

use super::sorting::{CompositeOrder, Sortable};
use std::fmt;

/// Ordered, sliceable sequence of sortable elements.
///
/// Implementations must stay deferred: none of these operations may pull
/// elements from the underlying source.
pub trait Sequence: Sized {
    /// Element type, ordered through its registered schema
    type Item: Sortable;

    /// Order the whole sequence by `order`.
    ///
    /// Earlier orderings only survive as the tie-break of a stable sort.
    fn order_by(self, order: CompositeOrder<Self::Item>) -> Self;

    /// Drop the first `count` elements
    fn skip(self, count: usize) -> Self;

    /// Keep at most `count` elements
    fn take(self, count: usize) -> Self;
}

enum Stage<T> {
    Order(CompositeOrder<T>),
    Skip(usize),
    Take(usize),
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Order(order) => f.debug_tuple("Order").field(order).finish(),
            Stage::Skip(n) => f.debug_tuple("Skip").field(n).finish(),
            Stage::Take(n) => f.debug_tuple("Take").field(n).finish(),
        }
    }
}

/// In-memory sequence over any iterator.
///
/// Nothing is pulled from the source until [`MemoryQuery::execute`] (or one
/// of the consuming helpers) runs. Skip and take stream; an ordering stage
/// collects its input once and sorts it stably.
pub struct MemoryQuery<'a, T> {
    source: Box<dyn Iterator<Item = T> + 'a>,
    stages: Vec<Stage<T>>,
}

impl<T> fmt::Debug for MemoryQuery<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryQuery")
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

impl<'a, T: 'a> MemoryQuery<'a, T> {
    /// Defer over `items` without pulling from them
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            source: Box::new(items.into_iter()),
            stages: Vec::new(),
        }
    }

    /// Number of recorded, not yet executed operations
    pub fn pending_stages(&self) -> usize {
        self.stages.len()
    }

    /// Run every recorded stage and return the resulting iterator
    pub fn execute(self) -> Box<dyn Iterator<Item = T> + 'a> {
        let mut iter = self.source;

        for stage in self.stages {
            iter = match stage {
                Stage::Order(order) => {
                    let mut items: Vec<T> = iter.collect();
                    order.sort(&mut items);
                    Box::new(items.into_iter())
                }
                Stage::Skip(count) => Box::new(iter.skip(count)),
                Stage::Take(count) => Box::new(iter.take(count)),
            };
        }

        iter
    }

    /// Execute and collect
    pub fn into_vec(self) -> Vec<T> {
        self.execute().collect()
    }

    /// Execute and take the first element
    pub fn first(self) -> Option<T> {
        self.execute().next()
    }

    /// Execute and take the last element
    pub fn last(self) -> Option<T> {
        self.execute().last()
    }

    /// Execute and count the elements
    pub fn count(self) -> usize {
        self.execute().count()
    }
}

impl<'a, T: 'a> From<Vec<T>> for MemoryQuery<'a, T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T: 'a> IntoIterator for MemoryQuery<'a, T> {
    type Item = T;
    type IntoIter = Box<dyn Iterator<Item = T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.execute()
    }
}

impl<T: Sortable> Sequence for MemoryQuery<'_, T> {
    type Item = T;

    fn order_by(mut self, order: CompositeOrder<T>) -> Self {
        self.stages.push(Stage::Order(order));
        self
    }

    fn skip(mut self, count: usize) -> Self {
        self.stages.push(Stage::Skip(count));
        self
    }

    fn take(mut self, count: usize) -> Self {
        self.stages.push(Stage::Take(count));
        self
    }
}

/// Wrap a collection as a deferred [`MemoryQuery`]
pub trait AsQuery<'a>: IntoIterator + Sized
where
    Self::IntoIter: 'a,
    Self::Item: 'a,
{
    /// Start a deferred query over `self`
    fn as_query(self) -> MemoryQuery<'a, Self::Item> {
        MemoryQuery::new(self)
    }
}

impl<'a, I> AsQuery<'a> for I
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
{
}
