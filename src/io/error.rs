//! Error types for configuration, resume replay and output

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Search parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Resume prefix names a box that does not exist
    #[error("Integer {value}: box {box_index} is out of range (box count {box_count})")]
    BoxOutOfRange {
        /// Integer being placed
        value: usize,
        /// Offending box index
        box_index: usize,
        /// Number of boxes in the search
        box_count: usize,
    },

    /// Resume prefix opens boxes out of increasing index order
    #[error("Integer {value}: box {box_index} opened out of order (next new box is {expected})")]
    BoxOutOfOrder {
        /// Integer being placed
        value: usize,
        /// Offending box index
        box_index: usize,
        /// Lowest box index that has not been used yet
        expected: usize,
    },

    /// Resume prefix places an integer into a box that cannot take it
    #[error("Integer {value}: box {box_index} is not eligible")]
    IneligiblePlacement {
        /// Integer being placed
        value: usize,
        /// Offending box index
        box_index: usize,
    },

    /// Resume prefix does not fit inside the domain
    #[error("Prefix of length {length} exceeds domain bound {domain_bound}")]
    PrefixTooLong {
        /// Number of integers in the prefix
        length: usize,
        /// Configured domain bound
        domain_bound: usize,
    },

    /// Resume prefix text contains a token that is not a box index
    #[error("Malformed prefix token '{token}' at position {position}")]
    MalformedPrefix {
        /// Zero-based token position
        position: usize,
        /// Offending token
        token: String,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Dedicated search thread could not be spawned or panicked
    #[error("Search thread failed: {reason}")]
    SearchThread {
        /// Description of the failure
        reason: String,
    },
}

/// Convenience type alias for search results
pub type Result<T> = std::result::Result<T, SearchError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SearchError {
    SearchError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for an operation on a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> SearchError {
    SearchError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
