//! Custom error types for doi2pdf.
//!
//! This module defines all error types used throughout the crate.
//! All functions return `Result<T, Doi2PdfError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for doi2pdf operations.
///
/// `NotFound` is the domain condition: the paper, its PDF link or the PDF
/// itself could not be obtained. The other variants carry plumbing failures.
#[derive(Debug, Error)]
pub enum Doi2PdfError {
    /// Paper, PDF URL or document could not be found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTML or JSON payload did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl Doi2PdfError {
    /// Shorthand for building a [`Doi2PdfError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether this is the `NotFound` condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using `Doi2PdfError`
pub type Result<T> = std::result::Result<T, Doi2PdfError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a not-found message
    fn ok_or_not_found(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Doi2PdfError::NotFound(msg.to_string()))
    }
}
