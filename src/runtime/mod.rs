//! Async executor for search controller actions.
//!
//! [`SearchRuntime`] owns the controller state and turns the [`Action`]s returned
//! by [`handle_event`] into tokio work:
//!
//! ```text
//! ScheduleDebounce ─► abort previous timer, spawn sleep ─► Event::DebounceElapsed
//! StartFetch       ─► spawn provider.search            ─► Event::FetchCompleted
//! CancelDebounce   ─► abort timer
//! CancelFetch      ─► abort request task (drops the HTTP future)
//! Navigate         ─► navigator.navigate(value)
//! ```
//!
//! Completions come back through an internal channel and are dispatched like any
//! other event, one at a time. Aborting a task is best effort: a completion that
//! was queued just before the abort still arrives, and the handler discards it
//! because its generation or token is no longer current.
//!
//! # Modules
//!
//! - [`navigator`]: Route type and the navigator capability
//! - [`menu`]: Fixed trending/category destinations

pub mod menu;
pub mod navigator;

pub use menu::{MenuEntry, NavigationMenu, CATEGORIES};
pub use navigator::{ChannelNavigator, Navigator, Route};

use crate::app::{handle_event, Action, AppState, Event, RequestToken, Transition};
use crate::provider::SearchProvider;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Drives an [`AppState`] against a real clock and a real provider.
pub struct SearchRuntime {
    state: AppState,
    provider: Arc<dyn SearchProvider>,
    navigator: Box<dyn Navigator>,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    debounce: Option<JoinHandle<()>>,
    fetch: Option<(RequestToken, JoinHandle<()>)>,
}

impl SearchRuntime {
    /// Creates a runtime around `state`.
    ///
    /// Must be called from within a tokio runtime; timers and requests are
    /// spawned onto it.
    #[must_use]
    pub fn new(
        state: AppState,
        provider: Arc<dyn SearchProvider>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            provider,
            navigator,
            tx,
            rx,
            debounce: None,
            fetch: None,
        }
    }

    /// Current controller state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of provider requests whose tasks are still running.
    ///
    /// Never exceeds one.
    #[must_use]
    pub fn requests_in_flight(&self) -> usize {
        self.fetch
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map_or(0, |_| 1)
    }

    /// Handles an external event (keystroke, focus, pointer) and runs its actions.
    pub fn dispatch(&mut self, event: Event) -> Transition {
        if let Event::FetchCompleted { token, .. } = &event {
            if self.fetch.as_ref().is_some_and(|(current, _)| current == token) {
                self.fetch = None;
            }
        }

        let transition = handle_event(&mut self.state, &event);
        for action in &transition.actions {
            self.execute(action);
        }
        transition
    }

    /// Waits for the next timer or network completion and dispatches it.
    ///
    /// Never returns `None` while the runtime is alive, since it holds its own
    /// sender; the `Option` mirrors `mpsc::Receiver::recv`.
    pub async fn step(&mut self) -> Option<Transition> {
        let event = self.rx.recv().await?;
        Some(self.dispatch(event))
    }

    fn execute(&mut self, action: &Action) {
        match action {
            Action::ScheduleDebounce { generation, delay } => {
                if let Some(previous) = self.debounce.take() {
                    previous.abort();
                }
                let tx = self.tx.clone();
                let generation = *generation;
                let delay = *delay;
                self.debounce = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::DebounceElapsed { generation });
                }));
            }
            Action::CancelDebounce => {
                if let Some(previous) = self.debounce.take() {
                    previous.abort();
                }
            }
            Action::StartFetch { token, query } => {
                if let Some((previous, handle)) = self.fetch.take() {
                    tracing::debug!(token = %previous, "aborting request left running");
                    handle.abort();
                }
                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                let token = *token;
                let query = query.clone();
                let span = tracing::debug_span!("fetch", %token, query = %query);
                let handle = tokio::spawn(
                    async move {
                        let outcome = provider.search(&query).await;
                        let _ = tx.send(Event::FetchCompleted { token, outcome });
                    }
                    .instrument(span),
                );
                self.fetch = Some((token, handle));
            }
            Action::CancelFetch { token } => match self.fetch.take() {
                Some((current, handle)) if current == *token => {
                    tracing::debug!(%token, "request aborted");
                    handle.abort();
                }
                other => self.fetch = other,
            },
            Action::Navigate(value) => self.navigator.navigate(value),
        }
    }
}

impl Drop for SearchRuntime {
    fn drop(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        if let Some((_, handle)) = self.fetch.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for SearchRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRuntime")
            .field("state", &self.state)
            .field("debounce_armed", &self.debounce.is_some())
            .field("fetch", &self.fetch.as_ref().map(|(token, _)| *token))
            .finish_non_exhaustive()
    }
}
