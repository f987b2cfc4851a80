//! Error types for webattr
//!
//! This module provides the error type hierarchy using `thiserror`.
//! Setup errors (selector resolution, empty input) abort a batch; fetch
//! errors are absorbed per item and never escape the batch driver.

use thiserror::Error;

/// The main error type for webattr operations
#[derive(Error, Debug)]
pub enum Error {
    /// The attribute selector could not be resolved into a query
    #[error("Invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),

    /// No addresses were supplied
    #[error("No input addresses supplied")]
    EmptyInput,

    /// Fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Output template errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

}

/// Selector resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Selector is neither a preset nor `abstract(...)`
    #[error("unrecognized selector '{0}' (expected canonical, title or abstract(tag, predicate, property))")]
    Unrecognized(String),

    /// `abstract(...)` did not contain exactly three arguments
    #[error("abstract(...) takes exactly 3 arguments, got {0}")]
    ArgumentCount(usize),

    /// One of the three arguments was blank
    #[error("abstract(...) argument {0} is empty")]
    EmptyArgument(usize),

    /// A quoted literal was never closed
    #[error("unterminated quoted literal starting at offset {0}")]
    UnterminatedLiteral(usize),

    /// Parentheses do not balance
    #[error("unbalanced parentheses at offset {0}")]
    UnbalancedParens(usize),

    /// Tag argument is not a valid element name
    #[error("'{0}' is not a valid tag name")]
    InvalidTag(String),

    /// Property argument is empty or not a valid property name
    #[error("'{0}' is not a valid property name")]
    InvalidProperty(String),

    /// Predicate text could not be parsed
    #[error("invalid predicate '{input}': {reason}")]
    Predicate {
        /// Predicate text as written
        input: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Per-item fetch failures
#[derive(Error, Debug)]
pub enum FetchError {
    /// Address failed validation
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request did not complete in time
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Server answered with a non-success status
    #[error("HTTP error {status}: {uri}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested address
        uri: String,
    },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Local file could not be read
    #[error("Failed to read {path}: {source}")]
    File {
        /// Path on disk
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Output template errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `${` without a closing brace
    #[error("unclosed placeholder at offset {0}")]
    UnclosedPlaceholder(usize),

    /// `${Name}` with a name that is not a known placeholder
    #[error("unknown placeholder '{0}'")]
    UnknownPlaceholder(String),
}

/// Result type alias for webattr operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was raised before any item was processed
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Error::InvalidSelector(_) | Error::EmptyInput | Error::Template(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::HttpStatus {
                status: status.as_u16(),
                uri: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        FetchError::Network(err.to_string())
    }
}
