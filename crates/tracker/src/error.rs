//! Error types for tracker construction and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while configuring or constructing a tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No measurement ID was configured.
    #[error(
        "You must specify the measurement ID provided by Google Analytics. \
         If you haven't created a property yet, see \
         https://support.google.com/analytics/answer/9304153. \
         The measurement ID is in the format 'G-XXXXXXXXXX'."
    )]
    MissingMeasurementId,

    /// Configuration JSON could not be parsed.
    #[error("invalid tracker configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read tracker configuration '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
