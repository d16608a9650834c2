//! Domain layer for hnsearch.
//!
//! Core types independent of the terminal, the HTTP transport or the async
//! runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`story`]: Story hits, items and comment trees from the HN search API

pub mod error;
pub mod story;

pub use error::{HnSearchError, Result};
pub use story::{Comment, Item, SearchResponse, StoryHit};
