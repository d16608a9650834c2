//! Error types for hnsearch.
//!
//! This module defines the crate-wide error type [`HnSearchError`] and a [`Result`]
//! alias. Fetch failures inside the search controller are modelled separately by
//! [`FetchError`](crate::provider::FetchError) because they never escalate: the
//! controller degrades to "keep showing what we had" instead of failing.

use thiserror::Error;

/// The main error type for hnsearch operations.
///
/// Variants cover configuration loading, directory lookup, filesystem access,
/// HTTP transport and terminal handling. Most wrap an underlying error via `#[from]`.
///
/// # Examples
///
/// ```
/// use hnsearch::HnSearchError;
///
/// fn validate_limit(limit: usize) -> Result<(), HnSearchError> {
///     if limit > 100 {
///         return Err(HnSearchError::Config("max_suggestions must be <= 100".to_string()));
///     }
///     Ok(())
/// }
/// assert!(validate_limit(500).is_err());
/// ```
#[derive(Debug, Error)]
pub enum HnSearchError {
    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Also raised by the terminal backend, which reports through `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request to the search API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No base directory could be determined for `{0}` files.
    ///
    /// Happens when neither the XDG variables nor a home directory are available.
    #[error("unable to determine {0} directory")]
    Directory(&'static str),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A fetch through the search provider failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::provider::FetchError),
}

/// A specialized `Result` type for hnsearch operations.
pub type Result<T> = std::result::Result<T, HnSearchError>;
