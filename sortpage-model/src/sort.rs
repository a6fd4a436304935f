//! Sort direction, terms and ordered term lists

use std::fmt;

/// Sort direction for a single term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// Interpret a direction token.
    ///
    /// Any token starting with `desc` (in any case) is descending; everything
    /// else, including an empty token, is ascending.
    pub fn from_token(token: &str) -> Self {
        let is_desc = token
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("desc"));
        if is_desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// True for [`SortDirection::Descending`]
    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }

    /// Apply this direction to an ascending comparison result
    #[inline]
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Canonical token, `asc` or `desc`
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `path:direction` entry of a sort specification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortTerm {
    /// Dot-separated property path, e.g. `Category.Name`
    pub path: String,
    /// Defaults to ascending
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: SortDirection,
}

impl SortTerm {
    /// Term for `path` in `direction`
    pub fn new(path: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }

    /// Ascending term for `path`
    pub fn ascending(path: impl Into<String>) -> Self {
        Self::new(path, SortDirection::Ascending)
    }

    /// Descending term for `path`
    pub fn descending(path: impl Into<String>) -> Self {
        Self::new(path, SortDirection::Descending)
    }

    /// Path segments in traversal order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }
}

impl fmt::Display for SortTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.direction)
    }
}

/// Ordered list of sort terms.
///
/// The first term is the primary key; every following term only breaks ties
/// left by the terms before it. An empty spec means "keep the input order".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SortSpec {
    terms: Vec<SortTerm>,
}

impl SortSpec {
    /// Empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term with lower precedence than the existing ones
    pub fn then_by(mut self, term: SortTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// In-place form of [`Self::then_by`]
    pub fn push(&mut self, term: SortTerm) {
        self.terms.push(term);
    }

    /// Terms, primary first
    pub fn terms(&self) -> &[SortTerm] {
        &self.terms
    }

    /// True when there is nothing to order by
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Iterate the terms, primary first
    pub fn iter(&self) -> std::slice::Iter<'_, SortTerm> {
        self.terms.iter()
    }
}

impl From<Vec<SortTerm>> for SortSpec {
    fn from(terms: Vec<SortTerm>) -> Self {
        Self { terms }
    }
}

impl FromIterator<SortTerm> for SortSpec {
    fn from_iter<I: IntoIterator<Item = SortTerm>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SortSpec {
    type Item = SortTerm;
    type IntoIter = std::vec::IntoIter<SortTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a SortSpec {
    type Item = &'a SortTerm;
    type IntoIter = std::slice::Iter<'a, SortTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Canonical string form: `Path:asc, Other.Path:desc`
impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
