//! Error types and diagnostics
//!
//! This module provides the fatal error type for generator runs and the
//! per-function diagnostic records emitted when a signature cannot be
//! marshalled. Fatal errors abort the run; diagnostics degrade a single
//! function and leave the rest of the output intact.

use std::path::PathBuf;
use thiserror::Error;

use crate::ir::CanonicalType;

/// Result type for solder operations
pub type SolderResult<T> = Result<T, SolderError>;

/// Main error type for solder
///
/// Every variant here is fatal: the run stops and nothing further is
/// written. Per-function marshalling failures are *not* errors, they are
/// recorded as [`Diagnostic`] values by the failure tracker.
#[derive(Debug, Error)]
pub enum SolderError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid API description
    #[error("Invalid description: {0}")]
    Document(String),

    /// Skeleton is missing its placeholder or cannot be used
    #[error("Template error: {0}")]
    Template(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

impl SolderError {
    /// Create a document error
    pub fn document(message: impl Into<String>) -> Self {
        SolderError::Document(message.into())
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        SolderError::Template(message.into())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Error - the function degrades to a placeholder
    Error,
    /// Warning - generation continues unchanged
    Warning,
}

impl Severity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A per-function diagnostic message
///
/// Carries the structured facts (function, offending argument, canonical
/// type) alongside the preformatted message so callers can either print
/// the message verbatim or inspect the fields.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Function the diagnostic belongs to
    pub function: String,
    /// Offending argument, if the failure was on the argument side
    pub argument: Option<String>,
    /// Canonical form of the type that could not be marshalled
    pub canonical: String,
    /// Preformatted message
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic for an argument whose type has no marshalling strategy
    pub fn accessor(function: &str, argument: &str, canonical: &CanonicalType) -> Self {
        Self {
            severity: Severity::Error,
            function: function.to_string(),
            argument: Some(argument.to_string()),
            canonical: canonical.to_string(),
            message: format!(
                "Accessor generation error: {}|{}|{}",
                function, argument, canonical
            ),
        }
    }

    /// Diagnostic for a result type that cannot be converted back
    pub fn result(function: &str, canonical: &CanonicalType) -> Self {
        Self {
            severity: Severity::Error,
            function: function.to_string(),
            argument: None,
            canonical: canonical.to_string(),
            message: format!("Result generation error: {}|{}", function, canonical),
        }
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        format!("{}: {}", self.severity.display(), self.message)
    }
}
