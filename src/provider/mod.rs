//! Search provider abstraction.
//!
//! The search controller never talks to the network directly. It emits
//! [`Action::StartFetch`](crate::app::Action::StartFetch) and the runtime calls an
//! injected [`SearchProvider`]. This keeps the controller testable with a scripted
//! fake and keeps transport details (timeouts, TLS, URL encoding) out of the state
//! machine.
//!
//! # Implementations
//!
//! - [`HnClient`]: Algolia Hacker News search API over reqwest

pub mod algolia;

pub use algolia::HnClient;

use crate::domain::StoryHit;
use async_trait::async_trait;
use thiserror::Error;

/// Why a fetch did not produce hits.
///
/// Only [`FetchError::Cancelled`] is expected during normal operation; it is what a
/// superseded request resolves to and is never surfaced. Every other variant is a
/// transient failure that leaves previous suggestions on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request was superseded or explicitly aborted.
    #[error("request cancelled")]
    Cancelled,

    /// The API answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Connection, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns `true` for the expected, silent cancellation case.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Keyword search capability used by the search controller's runtime.
///
/// Implementations return hits in provider rank order. Truncation to the
/// configured suggestion count is the controller's job, not the provider's.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches stories matching `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails or is cancelled.
    async fn search(&self, query: &str) -> Result<Vec<StoryHit>, FetchError>;
}
