//! Error types for minisector analysis.
//!
//! Every failure aborts the current comparison or render and is reported
//! upward; nothing is corrected or silently worked around inside the core.
//! The host decides how to present errors, usually via
//! [`AnalysisError::recovery_suggestions`].
//!
//! ## Error Categories
//!
//! - **Insufficient data**: empty traces, a zero-length track, fewer than two
//!   ranked results
//! - **Provider errors**: opaque failures from the data source, passed through
//! - **Input errors**: duplicate trace labels, invalid configuration, bad values
//! - **Render errors**: failures reported by the drawing backend
//!
//! ```rust
//! use minisector::AnalysisError;
//!
//! let error = AnalysisError::insufficient_data("reference trace has no samples");
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Main error type for minisector analysis.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("Insufficient data: {reason}")]
    InsufficientData { reason: String },

    #[error("Data provider error: {reason}")]
    Provider {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Trace label '{label}' appears more than once in the comparison")]
    DuplicateTrace { label: String },

    #[error("Invalid configuration for '{field}': {details}")]
    Config { field: String, details: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Rendering failed: {details}")]
    Render { details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalysisError::Provider { .. } => true,
            AnalysisError::File { .. } => true,
            AnalysisError::InsufficientData { .. } => false,
            AnalysisError::DuplicateTrace { .. } => false,
            AnalysisError::Config { .. } => false,
            AnalysisError::Parse { .. } => false,
            AnalysisError::Render { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            AnalysisError::InsufficientData { .. } => vec![
                "Try another event or session",
                "Check that the session has at least two classified drivers",
                "Verify both drivers set a timed lap with telemetry",
            ],
            AnalysisError::Provider { .. } => vec![
                "Check the data directory path",
                "Verify the event name matches the season schedule",
                "Retry once the data source is reachable",
            ],
            AnalysisError::DuplicateTrace { .. } => vec![
                "Compare two different drivers",
                "Check the results ranking for duplicate entries",
            ],
            AnalysisError::Config { .. } => vec![
                "Check the configuration file values",
                "Use a positive number of minisectors",
            ],
            AnalysisError::Parse { .. } => vec![
                "Check data format compatibility",
                "Verify source data integrity",
            ],
            AnalysisError::Render { .. } => vec![
                "Check the image dimensions in the configuration",
                "Report the failing event so it can be reproduced",
            ],
            AnalysisError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
                "Ensure sufficient disk space",
            ],
        }
    }

    /// Helper constructor for insufficient data errors.
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        AnalysisError::InsufficientData { reason: reason.into() }
    }

    /// Helper constructor for provider errors.
    pub fn provider(reason: impl Into<String>) -> Self {
        AnalysisError::Provider { reason: reason.into(), source: None }
    }

    /// Helper constructor for provider errors with source.
    pub fn provider_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        AnalysisError::Provider { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for configuration errors.
    pub fn config(field: impl Into<String>, details: impl Into<String>) -> Self {
        AnalysisError::Config { field: field.into(), details: details.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse(context: impl Into<String>, details: impl Into<String>) -> Self {
        AnalysisError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        AnalysisError::File { path, source }
    }

    /// Helper constructor for render errors; accepts any backend error.
    pub fn render(details: impl std::fmt::Display) -> Self {
        AnalysisError::Render { details: details.to_string() }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
