//! Error types for clipdown operations.
//!
//! Every pipeline stage returns [`Result`], so a failure in any stage stops
//! the run before the output file is touched.
//!
//! # Example
//!
//! ```rust
//! use clipdown_core::{ClipdownError, Result};
//!
//! fn body_of(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(ClipdownError::NoContent);
//!     }
//!     Ok(html)
//! }
//!
//! assert!(body_of("").is_err());
//! ```

use thiserror::Error;

/// Main error type for the fetch, extract, convert and write stages.
#[derive(Error, Debug)]
pub enum ClipdownError {
    /// HTTP request errors from reqwest.
    ///
    /// Covers DNS failures, refused connections and body decoding problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} returned for {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The best content candidate scored below the readability threshold.
    ///
    /// Navigation pages, search results and landing pages end up here.
    #[error("Content is not readable (score {score:.1} below threshold {threshold:.1})")]
    NotReadable { score: f64, threshold: f64 },

    /// No article title or body could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// HTML to Markdown conversion failed.
    #[error("Failed to convert HTML to Markdown: {0}")]
    Conversion(String),

    /// The article title cannot be used as a file name in the output directory.
    #[error("Invalid output file name: {0:?}")]
    InvalidFilename(String),

    /// File write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for ClipdownError.
pub type Result<T> = std::result::Result<T, ClipdownError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClipdownError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_not_readable_error() {
        let err = ClipdownError::NotReadable { score: 15.0, threshold: 20.0 };
        assert!(err.to_string().contains("15.0"));
        assert!(err.to_string().contains("20.0"));
    }

    #[test]
    fn test_http_status_error() {
        let err = ClipdownError::HttpStatus { status: 404, url: "https://example.com/missing".to_string() };
        assert_eq!(err.to_string(), "HTTP 404 returned for https://example.com/missing");
    }

    #[test]
    fn test_invalid_filename_error() {
        let err = ClipdownError::InvalidFilename("a/b".to_string());
        assert!(err.to_string().contains("\"a/b\""));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ClipdownError = io.into();
        assert!(matches!(err, ClipdownError::WriteError(_)));
    }
}
