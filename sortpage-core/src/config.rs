//! Limits applied to caller-supplied list parameters

use crate::error::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Inline JSON overrides, e.g. `{"max_page_size": 50}`
pub const CONFIG_JSON_VAR: &str = "SORTPAGE_QUERY_CONFIG_JSON";
/// Overrides [`QueryConfig::default_page_size`]
pub const DEFAULT_PAGE_SIZE_VAR: &str = "SORTPAGE_DEFAULT_PAGE_SIZE";
/// Overrides [`QueryConfig::max_page_size`]
pub const MAX_PAGE_SIZE_VAR: &str = "SORTPAGE_MAX_PAGE_SIZE";
/// Overrides [`QueryConfig::max_sort_terms`]
pub const MAX_SORT_TERMS_VAR: &str = "SORTPAGE_MAX_SORT_TERMS";

/// Configuration for list request handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when the request names none
    pub default_page_size: i64,

    /// Larger requested page sizes are clamped to this value
    pub max_page_size: i64,

    /// Maximum number of terms accepted in one sort string
    pub max_sort_terms: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            max_sort_terms: 5,
        }
    }
}

impl QueryConfig {
    /// Load configuration from the environment (after reading `.env`).
    ///
    /// Evaluation order:
    /// 1) defaults,
    /// 2) `$SORTPAGE_QUERY_CONFIG_JSON` (inline JSON, partial allowed),
    /// 3) the individual `SORTPAGE_*` variables, which win over the JSON.
    pub fn load_from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = match env::var(CONFIG_JSON_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse_json(&raw)?,
            _ => Self::default(),
        };

        if let Some(size) = parse_var::<i64>(DEFAULT_PAGE_SIZE_VAR)? {
            config.default_page_size = size;
        }
        if let Some(size) = parse_var::<i64>(MAX_PAGE_SIZE_VAR)? {
            config.max_page_size = size;
        }
        if let Some(terms) = parse_var::<usize>(MAX_SORT_TERMS_VAR)? {
            config.max_sort_terms = terms;
        }

        config.validate()?;
        debug!("Loaded query config: {:?}", config);
        Ok(config)
    }

    /// Parse a JSON object; absent fields keep their defaults
    pub fn parse_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|err| {
            QueryError::InvalidConfig(format!("failed to parse {CONFIG_JSON_VAR}: {err}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every request fail or return nothing
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size <= 0 {
            return Err(QueryError::InvalidConfig(format!(
                "max_page_size must be positive, got {}",
                self.max_page_size
            )));
        }
        if self.default_page_size <= 0 || self.default_page_size > self.max_page_size {
            return Err(QueryError::InvalidConfig(format!(
                "default_page_size must be within 1..={}, got {}",
                self.max_page_size, self.default_page_size
            )));
        }
        if self.max_sort_terms == 0 {
            return Err(QueryError::InvalidConfig(
                "max_sort_terms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| QueryError::InvalidConfig(format!("invalid {name}={raw:?}: {err}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = QueryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.max_sort_terms, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = QueryConfig::parse_json(r#"{"max_page_size": 50}"#).unwrap();
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_sort_terms, 5);
    }

    #[test]
    fn test_invalid_limits_are_rejected() {
        let err = QueryConfig::parse_json(r#"{"default_page_size": 500}"#).unwrap_err();
        assert!(matches!(err, QueryError::InvalidConfig(_)));

        let err = QueryConfig::parse_json(r#"{"max_sort_terms": 0}"#).unwrap_err();
        assert!(matches!(err, QueryError::InvalidConfig(_)));

        let err = QueryConfig::parse_json("not json").unwrap_err();
        assert!(err.to_string().contains(CONFIG_JSON_VAR));
    }
}
