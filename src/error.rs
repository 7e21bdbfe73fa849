//! Error types for codementor
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for codementor operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, backend interactions, panel state transitions,
/// and input validation.
#[derive(Error, Debug)]
pub enum MentorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend-related errors (API calls, malformed responses)
    #[error("Backend error: {0}")]
    Backend(String),

    /// The backend returned a non-success HTTP status
    #[error("Backend returned {status} for {endpoint}: {message}")]
    BackendStatus {
        /// HTTP status code returned
        status: u16,
        /// The endpoint path that failed
        endpoint: String,
        /// Body text or reason phrase, when available
        message: String,
    },

    /// Input validation caught before dispatch (empty source, blank message)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A run-class workspace command was submitted while another is in flight
    #[error("Workspace is busy: {0}")]
    WorkspaceBusy(String),

    /// Findings are stale because the source buffer changed after analysis
    #[error("Findings are stale: {0}")]
    StaleFindings(String),

    /// A panel operation was attempted in a state that does not permit it
    #[error("Invalid state for operation: {0}")]
    InvalidState(String),

    /// No project is loaded in the workspace
    #[error("No project loaded: {0}")]
    NoProject(String),

    /// Referenced file or tab does not exist
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for codementor operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = MentorError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_backend_error_display() {
        let error = MentorError::Backend("connection refused".to_string());
        assert_eq!(error.to_string(), "Backend error: connection refused");
    }

    #[test]
    fn test_backend_status_display() {
        let error = MentorError::BackendStatus {
            status: 500,
            endpoint: "/api/analyze-code".to_string(),
            message: "internal error".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("500"));
        assert!(s.contains("/api/analyze-code"));
        assert!(s.contains("internal error"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = MentorError::Validation("source is empty".to_string());
        assert_eq!(error.to_string(), "Validation error: source is empty");
    }

    #[test]
    fn test_workspace_busy_display() {
        let error = MentorError::WorkspaceBusy("run in progress".to_string());
        assert_eq!(error.to_string(), "Workspace is busy: run in progress");
    }

    #[test]
    fn test_stale_findings_display() {
        let error = MentorError::StaleFindings("buffer edited since analysis".to_string());
        assert_eq!(
            error.to_string(),
            "Findings are stale: buffer edited since analysis"
        );
    }

    #[test]
    fn test_unknown_file_display() {
        let error = MentorError::UnknownFile("src/missing.py".to_string());
        assert_eq!(error.to_string(), "Unknown file: src/missing.py");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: MentorError = io_error.into();
        assert!(matches!(error, MentorError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: MentorError = json_error.into();
        assert!(matches!(error, MentorError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: MentorError = yaml_error.into();
        assert!(matches!(error, MentorError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MentorError>();
    }
}
