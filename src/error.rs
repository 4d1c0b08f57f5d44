//! Unified error hierarchy for NutriRS
//!
//! Structured error types for the fallible surfaces of the crate (storage,
//! configuration, export, CLI I/O) with severity mapping into the tracing
//! system. The calculation engine itself is total over its inputs; only
//! window-based analyses can fail, and only for insufficient data.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all NutriRS operations
#[derive(Debug, Error)]
pub enum NutriError {
    /// Persistent store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Persistent store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Record missing from the store
    #[error("Record not found: {record}")]
    NotFound { record: String },

    /// Stored document could not be deserialized
    #[error("Corrupted record at {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// Write to the backing file failed
    #[error("Write failed for {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Calculation errors
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Not enough data points for a window-based analysis
    #[error("Insufficient data for {calculation}: {reason}")]
    InsufficientData { calculation: String, reason: String },

    /// Invalid parameter supplied to a calculation
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },

    /// No usable rate of change for a projection
    #[error("No rate of change available for {calculation}")]
    NoRate { calculation: String },
}

/// Result type alias for NutriRS operations
pub type Result<T> = std::result::Result<T, NutriError>;

impl NutriError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NutriError::Storage(StorageError::NotFound { .. }) => ErrorSeverity::Warning,
            NutriError::Validation(_) => ErrorSeverity::Warning,
            NutriError::Calculation(_) => ErrorSeverity::Warning,
            NutriError::Storage(_) => ErrorSeverity::Error,
            NutriError::Io(_) => ErrorSeverity::Error,
            NutriError::Configuration(_) => ErrorSeverity::Error,
            NutriError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            NutriError::Storage(StorageError::NotFound { record }) => {
                format!(
                    "No saved {} yet. Run the matching `set` command first.",
                    record
                )
            }
            NutriError::Storage(StorageError::Corrupted { path, .. }) => {
                format!(
                    "Saved data at {} is unreadable and may need to be re-entered.",
                    path.display()
                )
            }
            NutriError::Calculation(CalculationError::InsufficientData { calculation, .. }) => {
                format!(
                    "Not enough tracked days to calculate {}. Log more days first.",
                    calculation
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = NutriError::Storage(StorageError::NotFound {
            record: "profile".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = NutriError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = NutriError::Storage(StorageError::WriteFailed {
            path: PathBuf::from("/data/profile.json"),
            reason: "disk full".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err = NutriError::Storage(StorageError::NotFound {
            record: "goal".to_string(),
        });
        assert!(err.user_message().contains("No saved goal"));

        let err = NutriError::Calculation(CalculationError::InsufficientData {
            calculation: "weekly summary".to_string(),
            reason: "no days".to_string(),
        });
        assert!(err.user_message().contains("Not enough tracked days"));
    }

    #[test]
    fn test_severity_tracing_levels() {
        assert_eq!(
            ErrorSeverity::Critical.to_tracing_level(),
            tracing::Level::ERROR
        );
        assert_eq!(
            ErrorSeverity::Warning.to_tracing_level(),
            tracing::Level::WARN
        );
    }
}
