//! End-to-end tests of the tokio runtime against a scripted provider.
//!
//! Time is paused, so debounce windows and request latencies are exact and
//! the tests run instantly.

use async_trait::async_trait;
use hnsearch::app::{AppState, Event, Key, SearchSettings};
use hnsearch::runtime::{ChannelNavigator, Navigator, Route, SearchRuntime};
use hnsearch::{FetchError, SearchProvider, StoryHit, Theme, Transition};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Outcome = Result<Vec<StoryHit>, FetchError>;

fn hits(query: &str, n: usize) -> Vec<StoryHit> {
    (0..n)
        .map(|i| StoryHit::new(format!("{query}-{i}"), format!("{query} story {i}")))
        .collect()
}

/// Records queries that were dropped before their response was produced.
struct DropWatch {
    query: String,
    unfinished: Arc<Mutex<Vec<String>>>,
    finished: bool,
}

impl Drop for DropWatch {
    fn drop(&mut self) {
        if !self.finished {
            self.unfinished.lock().unwrap().push(self.query.clone());
        }
    }
}

#[derive(Default)]
struct ScriptedProvider {
    script: HashMap<String, (Duration, Outcome)>,
    calls: Mutex<Vec<String>>,
    unfinished: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    fn respond(mut self, query: &str, latency_ms: u64, outcome: Outcome) -> Self {
        self.script
            .insert(query.to_string(), (Duration::from_millis(latency_ms), outcome));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn unfinished(&self) -> Vec<String> {
        self.unfinished.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, query: &str) -> Outcome {
        self.calls.lock().unwrap().push(query.to_string());
        let (delay, outcome) = self
            .script
            .get(query)
            .cloned()
            .unwrap_or_else(|| (Duration::from_millis(20), Ok(hits(query, 3))));

        let mut watch = DropWatch {
            query: query.to_string(),
            unfinished: Arc::clone(&self.unfinished),
            finished: false,
        };
        tokio::time::sleep(delay).await;
        watch.finished = true;
        outcome
    }
}

#[derive(Clone, Default)]
struct RecordingNavigator(Arc<Mutex<Vec<String>>>);

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, value: &str) {
        self.0.lock().unwrap().push(value.to_string());
    }
}

fn runtime_with(provider: &Arc<ScriptedProvider>, navigator: Box<dyn Navigator>) -> SearchRuntime {
    let mut state = AppState::new(SearchSettings::default(), Theme::default());
    state.is_focused = true;
    let provider: Arc<dyn SearchProvider> = provider.clone();
    SearchRuntime::new(state, provider, navigator)
}

async fn step(runtime: &mut SearchRuntime) -> Transition {
    tokio::time::timeout(Duration::from_secs(60), runtime.step())
        .await
        .expect("runtime produced no event")
        .expect("runtime channel closed")
}

/// Steps until no timer or request is outstanding.
async fn settle(runtime: &mut SearchRuntime) {
    while runtime.state().debounce_pending() || runtime.state().in_flight().is_some() {
        step(runtime).await;
        assert!(runtime.requests_in_flight() <= 1);
    }
}

fn labels(runtime: &SearchRuntime) -> Vec<String> {
    runtime.state().candidates().into_iter().map(|c| c.label).collect()
}

#[tokio::test(start_paused = true)]
async fn typing_burst_sends_single_request_for_final_text() {
    let provider = Arc::new(ScriptedProvider::default().respond("react", 50, Ok(hits("react", 7))));
    let mut runtime = runtime_with(&provider, Box::new(RecordingNavigator::default()));

    runtime.dispatch(Event::Input("rea".to_string()));
    tokio::time::sleep(Duration::from_millis(100)).await;
    runtime.dispatch(Event::Char('c'));
    tokio::time::sleep(Duration::from_millis(299)).await;
    runtime.dispatch(Event::Char('t'));

    settle(&mut runtime).await;

    assert_eq!(provider.calls(), vec!["react"]);
    assert_eq!(runtime.state().suggestions.len(), 5);
    assert!(!runtime.state().loading);
}

#[tokio::test(start_paused = true)]
async fn debounce_waits_for_quiescence() {
    let provider = Arc::new(ScriptedProvider::default());
    let mut runtime = runtime_with(&provider, Box::new(RecordingNavigator::default()));

    let started = tokio::time::Instant::now();
    runtime.dispatch(Event::Input("tokio".to_string()));
    step(&mut runtime).await;

    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(300) && waited < Duration::from_millis(310));
    assert!(runtime.state().loading);
    assert_eq!(runtime.requests_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_request_is_aborted_and_its_result_never_applied() {
    let provider = Arc::new(
        ScriptedProvider::default()
            .respond("abc", 1_000, Ok(hits("abc", 4)))
            .respond("abcd", 10, Ok(hits("abcd", 2))),
    );
    let mut runtime = runtime_with(&provider, Box::new(RecordingNavigator::default()));

    runtime.dispatch(Event::Input("abc".to_string()));
    step(&mut runtime).await;

    runtime.dispatch(Event::Char('d'));
    settle(&mut runtime).await;
    assert_eq!(labels(&runtime), vec!["abcd story 0", "abcd story 1"]);

    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(provider.calls(), vec!["abc", "abcd"]);
    assert_eq!(provider.unfinished(), vec!["abc"]);
    assert_eq!(labels(&runtime), vec!["abcd story 0", "abcd story 1"]);
}

#[tokio::test(start_paused = true)]
async fn short_query_cancels_in_flight_request_immediately() {
    let provider = Arc::new(ScriptedProvider::default().respond("rust", 1_000, Ok(hits("rust", 3))));
    let mut runtime = runtime_with(&provider, Box::new(RecordingNavigator::default()));

    runtime.dispatch(Event::Input("rust".to_string()));
    step(&mut runtime).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(runtime.requests_in_flight(), 1);
    assert_eq!(provider.calls(), vec!["rust"]);

    runtime.dispatch(Event::Input("ru".to_string()));

    assert_eq!(runtime.requests_in_flight(), 0);
    assert!(!runtime.state().loading);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(provider.unfinished(), vec!["rust"]);
    assert!(runtime.state().suggestions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_previous_suggestions() {
    let provider = Arc::new(
        ScriptedProvider::default()
            .respond("rust", 10, Ok(hits("rust", 2)))
            .respond("rusty", 10, Err(FetchError::Transport("connection reset".to_string()))),
    );
    let mut runtime = runtime_with(&provider, Box::new(RecordingNavigator::default()));

    runtime.dispatch(Event::Input("rust".to_string()));
    settle(&mut runtime).await;
    runtime.dispatch(Event::Input("rusty".to_string()));
    settle(&mut runtime).await;

    assert!(!runtime.state().loading);
    assert_eq!(labels(&runtime), vec!["rust story 0", "rust story 1"]);
}

#[tokio::test(start_paused = true)]
async fn committing_a_suggestion_navigates_and_records_history() {
    let provider = Arc::new(ScriptedProvider::default());
    let navigator = RecordingNavigator::default();
    let visited = Arc::clone(&navigator.0);
    let mut runtime = runtime_with(&provider, Box::new(navigator));

    runtime.dispatch(Event::Input("serde".to_string()));
    settle(&mut runtime).await;
    runtime.dispatch(Event::Key(Key::ArrowDown));
    let transition = runtime.dispatch(Event::Key(Key::Enter));

    assert!(transition.default_prevented);
    assert_eq!(*visited.lock().unwrap(), vec!["serde story 0"]);
    assert_eq!(runtime.state().history.entries(), ["serde story 0"]);
}

#[tokio::test(start_paused = true)]
async fn channel_navigator_emits_encoded_search_route() {
    let provider = Arc::new(ScriptedProvider::default());
    let (navigator, mut routes) = ChannelNavigator::new();
    let mut runtime = runtime_with(&provider, Box::new(navigator));

    runtime.dispatch(Event::Commit("rust & go".to_string()));

    let route = routes.recv().await.unwrap();
    assert_eq!(route, Route::search("rust & go"));
    assert_eq!(route.to_path(), "/search/rust%20&%20go");
}
