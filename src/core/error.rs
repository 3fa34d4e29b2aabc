//! Error types for frame-grouper
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for grouping operations
pub type Result<T> = std::result::Result<T, GrouperError>;

/// Errors that can occur while grouping and renaming frames
#[derive(Error, Debug)]
pub enum GrouperError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Root directory not found
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// No dated FLAT frames in a calibration folder
    #[error("No FLAT dates found in {path}")]
    EmptyCalibrationSet { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown grouping logic requested
    #[error("Unknown grouping logic: {value} (expected 'direct' or 'midpoint')")]
    UnknownLogic { value: String },

    /// JSON parsing error (config file)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<GrouperError>,
    },
}

impl GrouperError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        GrouperError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GrouperError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GrouperError::DirectoryNotFound {
            path: PathBuf::from("/tmp/missing"),
        };
        assert!(err.to_string().contains("/tmp/missing"));
    }

    #[test]
    fn test_empty_calibration_set_display() {
        let err = GrouperError::EmptyCalibrationSet {
            path: PathBuf::from("/data/System1/B/FLAT"),
        };
        assert!(err.to_string().contains("FLAT"));
        assert!(err.to_string().contains("/data/System1/B"));
    }

    #[test]
    fn test_unknown_logic_display() {
        let err = GrouperError::UnknownLogic {
            value: "nearest".to_string(),
        };
        assert!(err.to_string().contains("nearest"));
        assert!(err.to_string().contains("midpoint"));
    }

    #[test]
    fn test_error_with_context() {
        let err = GrouperError::invalid_config("bad value");
        let wrapped = err.with_context("loading config");
        assert!(wrapped.to_string().contains("loading config"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GrouperError = io_err.into();
        assert!(matches!(err, GrouperError::Io(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(GrouperError::invalid_config("test"));
        let with_ctx = result.context("during processing");
        assert!(with_ctx.is_err());
        assert!(with_ctx.unwrap_err().to_string().contains("during processing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: GrouperError = json_err.into();
        assert!(matches!(err, GrouperError::Json(_)));
    }
}
