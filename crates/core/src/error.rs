//! Error types for abstractor operations.
//!
//! This module defines the main error type [`AbstractorError`] which
//! represents every way a single link can fail to produce a summary:
//! fetching, access restrictions, layout drift and configuration.
//!
//! # Example
//!
//! ```rust
//! use abstractor_core::{AbstractorError, Result};
//!
//! fn word_count(raw: Option<&str>) -> Result<String> {
//!     raw.map(str::to_string).ok_or(AbstractorError::MissingField { field: "words" })
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching, extraction and formatting.
///
/// Every variant is scoped to the single link being processed. Callers that
/// sit on a chat surface log the error and send nothing.
///
/// # Example
///
/// ```rust
/// use abstractor_core::{AbstractorError, ao3};
///
/// match ao3::navigate_series("<html></html>", 5) {
///     Ok(link) => println!("Work: {}", link),
///     Err(AbstractorError::SeriesOrdinalOutOfRange { ordinal, count }) => {
///         println!("Series has {} works, asked for {}", count, ordinal);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum AbstractorError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    /// The server answered with an anti-bot challenge page instead of content.
    #[error("Anti-bot challenge served for {url}")]
    Challenge { url: String },

    /// The archive redirected to its login page (archive-locked work).
    #[error("Access restricted for {url}")]
    Restricted { url: String },

    /// HTML parsing errors, typically an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A required field could not be located.
    ///
    /// This almost always means the site changed its layout. The whole
    /// summary is abandoned rather than emitting a partial record.
    #[error("Required field `{field}` not found")]
    MissingField { field: &'static str },

    /// The third-party metadata digest could not be decoded.
    #[error("Invalid metadata digest: {0}")]
    DigestError(#[from] serde_json::Error),

    /// A numbered work was requested beyond the end of a series.
    #[error("Series has {count} works, no work number {ordinal}")]
    SeriesOrdinalOutOfRange { ordinal: usize, count: usize },

    /// Bot configuration errors.
    ///
    /// Returned when configuration files are missing, unreadable or contain
    /// unknown directives.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File I/O errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

impl AbstractorError {
    /// True when the page never arrived: a bad status, a challenge, a
    /// timeout or a transport error.
    pub fn is_fetch_failure(&self) -> bool {
        match self {
            AbstractorError::HttpStatus { .. } | AbstractorError::Challenge { .. } | AbstractorError::Timeout { .. } => {
                true
            }
            #[cfg(feature = "fetch")]
            AbstractorError::HttpError(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for AbstractorError.
pub type Result<T> = std::result::Result<T, AbstractorError>;
