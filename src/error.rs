//! Error type shared by the curves, the cursor tracker and the configuration layer.
//!
//! Every failure is immediate and leaves the failing component untouched: a
//! rejected append does not move the write cursor, a failed binding does not
//! touch the drawable, and an invalid pointer call does not record a position.

use thiserror::Error;

use crate::data::source::SourceError;

/// Convenience alias for results using the crate error type.
pub type Result<T, E = PlotError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum PlotError {
    /// An operation was attempted before the required setup, or a setting is out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Append on a buffer whose write cursor already reached its capacity.
    #[error("Buffer overflow: capacity of {capacity} records exhausted")]
    CapacityExceeded { capacity: usize },

    /// A bound column is missing from the current results snapshot.
    #[error("Column '{column}' is not present in the results snapshot")]
    DataBinding { column: String },

    /// A handler was invoked with an explicitly absent argument.
    #[error("Invalid call: {0}")]
    InvalidCall(String),

    /// Reload failure reported by a results source, passed through unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
