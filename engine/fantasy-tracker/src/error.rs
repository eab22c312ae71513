//! Error types for the fantasy tracker

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while producing the daily artifacts
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Network or transport failure talking to the stats API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Stats API answered with a non-2xx status
    #[error("Stats API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body was not valid JSON
    #[error("Malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// Response was JSON but did not match the expected shape
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// Yesterday's snapshot does not exist
    #[error("Baseline snapshot not found: {}", .0.display())]
    BaselineMissing(PathBuf),

    /// Yesterday's snapshot exists but could not be parsed
    #[error("Baseline snapshot {} is malformed: {reason}", .path.display())]
    BaselineMalformed { path: PathBuf, reason: String },

    /// League entries file could not be parsed
    #[error("League entries file {} is malformed: {reason}", .path.display())]
    Entries { path: PathBuf, reason: String },

    /// I/O errors while writing artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    /// Create a new response shape error
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new malformed baseline error
    pub fn baseline_malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::BaselineMalformed { path: path.into(), reason: reason.to_string() }
    }

    /// Create a new malformed league entries error
    pub fn entries(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Entries { path: path.into(), reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_file() {
        let err = TrackerError::BaselineMissing(PathBuf::from("daily-outputs/2025-01-14.csv"));
        assert_eq!(err.to_string(), "Baseline snapshot not found: daily-outputs/2025-01-14.csv");

        let err = TrackerError::baseline_malformed("a.csv", "missing field `team`");
        assert!(err.to_string().contains("a.csv"));
        assert!(err.to_string().contains("missing field `team`"));
    }

    #[test]
    fn test_http_status_message() {
        let err = TrackerError::HttpStatus { status: 503, body: "maintenance".to_string() };
        assert_eq!(err.to_string(), "Stats API returned HTTP 503: maintenance");
    }
}
