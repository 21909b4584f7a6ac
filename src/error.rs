//! Error handling module for fwpack
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the application should use these types for consistency.

#![allow(dead_code)] // Error variants and helpers are available for future use

use thiserror::Error;

/// Main error type for fwpack
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// IO errors (file operations, directory walks, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Release manifest errors (loading, parsing, validation)
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Example-configuration errors (discovery, markers, apply)
    #[error("Configuration error: {0}")]
    Config(String),

    /// External tool invocation errors (pio, git, companion build)
    #[error("Tool execution failed: {0}")]
    Tool(String),

    /// An expected build artifact is missing
    #[error("Missing artifact: {0}")]
    Artifact(String),

    /// Archive read/write errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation errors (manifest values, configuration names)
    #[error("Validation error: {0}")]
    Validation(String),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for fwpack operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

// Convenient error constructors
impl ReleaseError {
    /// Create a manifest error
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Create a missing-artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Helper function to create general errors (for backward compatibility)
pub fn general_error(msg: impl Into<String>) -> ReleaseError {
    ReleaseError::General(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::manifest("missing project_dir");
        assert_eq!(err.to_string(), "Manifest error: missing project_dir");

        let err = ReleaseError::artifact("firmware.bin not found");
        assert_eq!(err.to_string(), "Missing artifact: firmware.bin not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(matches!(err, ReleaseError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = ReleaseError::tool("pio exited with code 1");
        assert!(matches!(err, ReleaseError::Tool(_)));

        let err = ReleaseError::validation("configuration name is empty");
        assert!(matches!(err, ReleaseError::Validation(_)));
    }
}
