//! List request parameters as received from a query string

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::query::{Sequence, apply_page, apply_sort_spec, parse_sort_spec};
use serde::{Deserialize, Serialize};
use sortpage_model::{PageRequest, SortSpec};
use tracing::warn;

/// `?sort=Name:desc&page=2&page_size=10`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Raw sort string, e.g. `Category.Name:asc,Name:desc`
    #[serde(default)]
    pub sort: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<i64>,
    /// Rows per page
    #[serde(default, alias = "pageSize", alias = "per_page")]
    pub page_size: Option<i64>,
}

impl ListParams {
    /// Parse the sort string, enforcing the configured term limit
    pub fn sort_spec(&self, config: &QueryConfig) -> Result<SortSpec> {
        let spec = match self.sort.as_deref() {
            Some(raw) => parse_sort_spec(raw)?,
            None => SortSpec::new(),
        };

        if spec.len() > config.max_sort_terms {
            return Err(QueryError::InvalidArgument(format!(
                "sort has {} terms, at most {} are allowed",
                spec.len(),
                config.max_sort_terms
            )));
        }

        Ok(spec)
    }

    /// Page window with defaults filled in and the size clamped
    pub fn page_request(&self, config: &QueryConfig) -> PageRequest {
        let page = self.page.unwrap_or(1);
        let requested = self.page_size.unwrap_or(config.default_page_size);

        let page_size = if requested > config.max_page_size {
            warn!(
                "Clamping page size {} to configured maximum {}",
                requested, config.max_page_size
            );
            config.max_page_size
        } else {
            requested
        };

        PageRequest::new(page, page_size)
    }

    /// Order then paginate `source`.
    ///
    /// Errors are raised before the sequence is touched.
    pub fn apply<Q: Sequence>(&self, source: Q, config: &QueryConfig) -> Result<Q> {
        let spec = self.sort_spec(config)?;
        let page = self.page_request(config);

        let ordered = apply_sort_spec(source, &spec)?;
        Ok(apply_page(ordered, page))
    }
}
