//! Input key and dropdown source types.
//!
//! The controller only cares about a handful of keys. Everything else typed into
//! the box reaches it as a query change, not as a key press.

/// Navigation keys understood by the search controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Moves the active candidate forward, wrapping to the first.
    ArrowDown,
    /// Moves the active candidate backward, wrapping to the last.
    ArrowUp,
    /// Commits the active candidate, if any.
    Enter,
    /// Clears the selection and the suggestion list.
    Escape,
    /// Any other key; never changes navigation state.
    Other,
}

/// Which list the dropdown is currently showing.
///
/// Derived from the query length and focus on every read; see
/// [`AppState::candidate_source`](super::AppState::candidate_source).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Query is long enough: provider suggestions.
    Suggestions,
    /// Query is short and the input is focused: search history.
    History,
    /// Query is short and the input is not focused.
    Hidden,
}
