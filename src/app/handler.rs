//! Event handling and state transition logic for the search controller.
//!
//! [`handle_event`] is a pure function of `(state, event)`: it mutates
//! [`AppState`] and returns a [`Transition`] describing what to redraw and which
//! side effects to run. It never blocks and never performs I/O, so every
//! transition runs to completion before the next event is looked at.
//!
//! # Event categories
//!
//! - **Input**: `Input`, `Char`, `Backspace`
//! - **Focus**: `Focus`, `Blur`
//! - **Navigation**: `Key`, `Hover`, `Activate`, `Commit`
//! - **Async completions**: `DebounceElapsed`, `FetchCompleted`
//! - **Presentation**: `ToggleTheme`
//!
//! # Staleness
//!
//! Completions carry the generation or token they were issued for. A completion
//! that no longer matches the current state is dropped here, which is what
//! guarantees that a superseded request can never be applied, even if its result
//! was already queued when it was cancelled.

use super::actions::{Action, RequestToken};
use super::modes::Key;
use super::state::AppState;
use crate::domain::StoryHit;
use crate::provider::FetchError;

/// Events delivered to the search controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The input text changed to the given value.
    Input(String),
    /// A character was typed at the end of the input.
    Char(char),
    /// The last character was deleted.
    Backspace,

    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,

    /// A navigation key was pressed while the input had focus.
    Key(Key),
    /// The pointer moved over candidate `n`.
    Hover(usize),
    /// Candidate `n` was clicked.
    Activate(usize),
    /// Commit an arbitrary value (host-level submit of the raw query).
    Commit(String),

    /// A quiescence timer fired.
    DebounceElapsed {
        /// Generation the timer was scheduled for.
        generation: u64,
    },

    /// A provider request finished.
    FetchCompleted {
        /// Request the result belongs to.
        token: RequestToken,
        /// Hits in provider order, or why there are none.
        outcome: Result<Vec<StoryHit>, FetchError>,
    },

    /// Switches between the light and dark theme.
    ToggleTheme,
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// The view changed and should be redrawn.
    pub should_render: bool,
    /// The key press was consumed; the host must not run its default action.
    pub default_prevented: bool,
    /// Side effects to execute, in order.
    pub actions: Vec<Action>,
}

impl Transition {
    const fn ignored() -> Self {
        Self {
            should_render: false,
            default_prevented: false,
            actions: Vec::new(),
        }
    }

    const fn render() -> Self {
        Self {
            should_render: true,
            default_prevented: false,
            actions: Vec::new(),
        }
    }

    fn with_actions(actions: Vec<Action>) -> Self {
        Self {
            should_render: true,
            default_prevented: false,
            actions,
        }
    }

    fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// Processes an event, mutates state and returns the resulting transition.
///
/// # Example
///
/// ```rust
/// use hnsearch::app::{handle_event, Action, AppState, Event, SearchSettings};
/// use hnsearch::ui::Theme;
///
/// let mut state = AppState::new(SearchSettings::default(), Theme::default());
/// let transition = handle_event(&mut state, &Event::Input("rust".into()));
/// assert!(matches!(transition.actions[0], Action::ScheduleDebounce { .. }));
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Transition {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind::from(event)).entered();

    match event {
        Event::Input(text) => set_query(state, text.clone()),
        Event::Char(c) => {
            let mut text = state.query.clone();
            text.push(*c);
            set_query(state, text)
        }
        Event::Backspace => {
            let mut text = state.query.clone();
            if text.pop().is_none() {
                return Transition::ignored();
            }
            set_query(state, text)
        }
        Event::Focus => {
            state.is_focused = true;
            state.reset_selection();
            Transition::render()
        }
        Event::Blur => {
            state.is_focused = false;
            state.reset_selection();
            Transition::render()
        }
        Event::Key(key) => handle_key(state, *key),
        Event::Hover(index) => {
            if *index >= state.candidate_count() || state.active_index == Some(*index) {
                return Transition::ignored();
            }
            state.active_index = Some(*index);
            Transition::render()
        }
        Event::Activate(index) => {
            let Some(candidate) = state.candidates().into_iter().nth(*index) else {
                tracing::debug!(index, "activated candidate out of range");
                return Transition::ignored();
            };
            commit(state, &candidate.label)
        }
        Event::Commit(value) => commit(state, value),
        Event::DebounceElapsed { generation } => debounce_elapsed(state, *generation),
        Event::FetchCompleted { token, outcome } => fetch_completed(state, *token, outcome),
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            tracing::debug!(theme = %state.theme.name, "theme toggled");
            Transition::render()
        }
    }
}

fn set_query(state: &mut AppState, text: String) -> Transition {
    if text == state.query {
        state.reset_selection();
        return Transition::render();
    }

    state.query = text;
    state.reset_selection();
    let generation = state.bump_generation();

    tracing::trace!(query = %state.query, generation, "search query updated");

    if state.query_is_active() {
        state.debounce_pending = true;
        return Transition::with_actions(vec![Action::ScheduleDebounce {
            generation,
            delay: state.settings.debounce,
        }]);
    }

    let mut actions = Vec::new();
    if state.debounce_pending {
        state.debounce_pending = false;
        actions.push(Action::CancelDebounce);
    }
    if let Some(token) = state.in_flight.take() {
        tracing::debug!(%token, "query too short, cancelling in-flight request");
        actions.push(Action::CancelFetch { token });
    }
    state.suggestions.clear();
    state.loading = false;

    Transition::with_actions(actions)
}

fn handle_key(state: &mut AppState, key: Key) -> Transition {
    if state.candidate_count() == 0 {
        return Transition::ignored();
    }

    match key {
        Key::ArrowDown => {
            state.move_selection_down();
            Transition::render().prevented()
        }
        Key::ArrowUp => {
            state.move_selection_up();
            Transition::render().prevented()
        }
        Key::Enter => match state.active_candidate() {
            Some(candidate) => commit(state, &candidate.label).prevented(),
            None => Transition::ignored(),
        },
        Key::Escape => {
            state.reset_selection();
            state.suggestions.clear();
            Transition::render()
        }
        Key::Other => Transition::ignored(),
    }
}

fn commit(state: &mut AppState, value: &str) -> Transition {
    if value.trim().is_empty() {
        tracing::debug!("ignoring commit of empty value");
        return Transition::ignored();
    }

    state.history.commit(value);
    state.reset_selection();

    tracing::debug!(value = %value, history_len = state.history.len(), "search committed");

    Transition::with_actions(vec![Action::Navigate(value.to_string())])
}

fn debounce_elapsed(state: &mut AppState, generation: u64) -> Transition {
    if generation != state.query_generation {
        tracing::trace!(generation, current = state.query_generation, "stale debounce timer ignored");
        return Transition::ignored();
    }
    state.debounce_pending = false;

    if !state.query_is_active() {
        return Transition::ignored();
    }

    let mut actions = Vec::with_capacity(2);
    if let Some(previous) = state.in_flight.take() {
        tracing::debug!(token = %previous, "superseding in-flight request");
        actions.push(Action::CancelFetch { token: previous });
    }

    let token = state.issue_token();
    state.in_flight = Some(token);
    state.loading = true;

    tracing::debug!(%token, query = %state.query, "issuing search request");
    actions.push(Action::StartFetch {
        token,
        query: state.query.clone(),
    });

    Transition::with_actions(actions)
}

fn fetch_completed(
    state: &mut AppState,
    token: RequestToken,
    outcome: &Result<Vec<StoryHit>, FetchError>,
) -> Transition {
    if state.in_flight != Some(token) {
        tracing::trace!(%token, "discarding result of superseded request");
        return Transition::ignored();
    }
    state.in_flight = None;
    state.loading = false;

    match outcome {
        Ok(hits) => {
            tracing::debug!(%token, hits = hits.len(), "suggestions received");
            state.apply_hits(hits.clone());
        }
        Err(err) if err.is_cancellation() => {
            tracing::trace!(%token, "request cancelled");
        }
        Err(err) => {
            tracing::warn!(%token, error = %err, "suggestion fetch failed, keeping previous results");
        }
    }

    Transition::render()
}

/// Payload-free event name for span fields; avoids logging whole hit lists.
#[derive(Debug)]
enum EventKind {
    Input,
    Char,
    Backspace,
    Focus,
    Blur,
    Key(Key),
    Hover,
    Activate,
    Commit,
    DebounceElapsed,
    FetchCompleted,
    ToggleTheme,
}

impl From<&Event> for EventKind {
    fn from(event: &Event) -> Self {
        match event {
            Event::Input(_) => Self::Input,
            Event::Char(_) => Self::Char,
            Event::Backspace => Self::Backspace,
            Event::Focus => Self::Focus,
            Event::Blur => Self::Blur,
            Event::Key(key) => Self::Key(*key),
            Event::Hover(_) => Self::Hover,
            Event::Activate(_) => Self::Activate,
            Event::Commit(_) => Self::Commit,
            Event::DebounceElapsed { .. } => Self::DebounceElapsed,
            Event::FetchCompleted { .. } => Self::FetchCompleted,
            Event::ToggleTheme => Self::ToggleTheme,
        }
    }
}
