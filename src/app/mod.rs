//! Search controller: state, events and actions.
//!
//! This layer sits between the async runtime and the domain/provider layers. It
//! implements the incremental search box as a unidirectional state machine:
//!
//! ```text
//! Keystroke / Focus / Timer / Response → Event → handle_event → State → Actions
//!                       ↑                                                  ↓
//!                       └──────────── SearchRuntime executes ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the handler (debounce, fetch, navigate)
//! - [`handler`]: Event processing and transition logic
//! - [`history`]: Dedupe-and-promote search history
//! - [`modes`]: Key and candidate source types
//! - [`state`]: Controller state and the derived candidate list

pub mod actions;
pub mod handler;
pub mod history;
pub mod modes;
pub mod state;

pub use actions::{Action, RequestToken};
pub use handler::{handle_event, Event, Transition};
pub use history::History;
pub use modes::{CandidateSource, Key};
pub use state::{AppState, Candidate, SearchSettings, Suggestion};
