//! Error types for sort and page operations

/// Errors raised while parsing, resolving or executing a query
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Malformed input such as a sort term with an empty path
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A path segment names no property of the type searched
    #[error("Property '{property}' not found on type '{type_name}'")]
    PropertyNotFound { property: String, type_name: String },

    /// A path ends on a value with no natural order
    #[error("Property '{property}' of type '{type_name}' is not orderable")]
    NotOrderable { property: String, type_name: String },

    /// Configuration values that failed to parse or validate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by the database driver
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result alias used across this crate
pub type Result<T> = std::result::Result<T, QueryError>;
