//! Sort string parsing
//!
//! Accepts the query-string form `Path[:direction][, Path[:direction]...]`,
//! e.g. `Category.Name:asc, Name:desc`.

use crate::error::{QueryError, Result};
use sortpage_model::{SortDirection, SortSpec, SortTerm};
use tracing::{debug, warn};

/// Parse a raw sort string into a [`SortSpec`].
///
/// Blank input yields an empty spec. Empty terms left by stray commas are
/// skipped. A term without a property path before its colon is rejected.
pub fn parse_sort_spec(raw: &str) -> Result<SortSpec> {
    let mut spec = SortSpec::new();

    for term in raw.split(',').map(str::trim) {
        if term.is_empty() {
            continue;
        }

        let (path, direction) = match term.split_once(':') {
            Some((path, token)) => (path.trim(), SortDirection::from_token(token.trim())),
            None => (term, SortDirection::Ascending),
        };

        if path.is_empty() {
            warn!("Rejecting sort term without property path: {:?}", term);
            return Err(QueryError::InvalidArgument(format!(
                "sort term '{term}' has an empty property path"
            )));
        }

        spec.push(SortTerm::new(path, direction));
    }

    if !spec.is_empty() {
        debug!("Parsed sort spec: {}", spec);
    }

    Ok(spec)
}
