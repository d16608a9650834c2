//! Behavioral tests for the search controller state machine.
//!
//! Timers and requests are driven by hand: each test feeds the events the
//! runtime would deliver and inspects the resulting actions.

use hnsearch::app::{handle_event, Action, AppState, Event, Key, RequestToken, SearchSettings, Transition};
use hnsearch::{FetchError, StoryHit, Theme};

fn new_state() -> AppState {
    let mut state = AppState::new(SearchSettings::default(), Theme::default());
    handle_event(&mut state, &Event::Focus);
    state
}

fn hits(prefix: &str, n: usize) -> Vec<StoryHit> {
    (0..n)
        .map(|i| StoryHit::new(format!("{prefix}-{i}"), format!("{prefix} story {i}")))
        .collect()
}

fn scheduled_generation(transition: &Transition) -> Option<u64> {
    transition.actions.iter().find_map(|a| match a {
        Action::ScheduleDebounce { generation, .. } => Some(*generation),
        _ => None,
    })
}

fn started_fetch(transition: &Transition) -> Option<(RequestToken, String)> {
    transition.actions.iter().find_map(|a| match a {
        Action::StartFetch { token, query } => Some((*token, query.clone())),
        _ => None,
    })
}

/// Types `text` and lets its debounce elapse. Returns the issued request.
fn type_and_settle(state: &mut AppState, text: &str) -> (RequestToken, String) {
    let typed = handle_event(state, &Event::Input(text.to_string()));
    let generation = scheduled_generation(&typed).expect("long query schedules a debounce");
    let fired = handle_event(state, &Event::DebounceElapsed { generation });
    started_fetch(&fired).expect("current debounce starts a fetch")
}

fn complete(state: &mut AppState, token: RequestToken, outcome: Result<Vec<StoryHit>, FetchError>) -> Transition {
    handle_event(state, &Event::FetchCompleted { token, outcome })
}

fn labels(state: &AppState) -> Vec<String> {
    state.candidates().into_iter().map(|c| c.label).collect()
}

#[test]
fn short_query_shows_history_without_fetching() {
    let mut state = new_state();
    state.history.commit("tokio");

    let transition = handle_event(&mut state, &Event::Input("re".to_string()));

    assert!(transition.actions.is_empty());
    assert_eq!(labels(&state), vec!["tokio"]);
}

#[test]
fn long_query_fetches_and_truncates_to_five() {
    let mut state = new_state();

    let (token, query) = type_and_settle(&mut state, "react");
    assert_eq!(query, "react");
    assert!(state.loading);

    complete(&mut state, token, Ok(hits("react", 7)));

    assert!(!state.loading);
    assert_eq!(state.suggestions.len(), 5);
    assert_eq!(labels(&state)[0], "react story 0");
    assert_eq!(state.active_index, None);
}

#[test]
fn burst_of_keystrokes_issues_one_fetch_for_final_text() {
    let mut state = new_state();

    let first = handle_event(&mut state, &Event::Input("rea".to_string()));
    let stale_generation = scheduled_generation(&first).unwrap();
    let second = handle_event(&mut state, &Event::Char('c'));
    let third = handle_event(&mut state, &Event::Char('t'));
    let generation = scheduled_generation(&third).unwrap();
    assert!(scheduled_generation(&second).is_some());

    let stale = handle_event(&mut state, &Event::DebounceElapsed { generation: stale_generation });
    assert!(stale.actions.is_empty());

    let fired = handle_event(&mut state, &Event::DebounceElapsed { generation });
    let fetches: Vec<_> = fired
        .actions
        .iter()
        .filter(|a| matches!(a, Action::StartFetch { .. }))
        .collect();
    assert_eq!(fetches.len(), 1);
    assert_eq!(started_fetch(&fired).unwrap().1, "react");
}

#[test]
fn shrinking_below_minimum_cancels_request_in_same_transition() {
    let mut state = new_state();
    let (token, _) = type_and_settle(&mut state, "rust");
    state.history.commit("older");

    let transition = handle_event(&mut state, &Event::Input("ru".to_string()));

    assert!(transition.actions.contains(&Action::CancelFetch { token }));
    assert_eq!(state.in_flight(), None);
    assert!(!state.loading);
    assert!(state.suggestions.is_empty());
    assert_eq!(labels(&state), vec!["older"]);

    let late = complete(&mut state, token, Ok(hits("rust", 3)));
    assert!(!late.should_render);
    assert!(state.suggestions.is_empty());
}

#[test]
fn shrinking_before_debounce_cancels_the_timer() {
    let mut state = new_state();
    let typed = handle_event(&mut state, &Event::Input("rust".to_string()));
    let generation = scheduled_generation(&typed).unwrap();

    let shrunk = handle_event(&mut state, &Event::Backspace);
    assert_eq!(state.query, "rus");
    assert!(scheduled_generation(&shrunk).is_some());

    let cleared = handle_event(&mut state, &Event::Input(String::new()));
    assert_eq!(cleared.actions, vec![Action::CancelDebounce]);

    let fired = handle_event(&mut state, &Event::DebounceElapsed { generation });
    assert!(fired.actions.is_empty());
}

#[test]
fn late_response_for_superseded_query_is_discarded() {
    let mut state = new_state();

    let (abc_token, _) = type_and_settle(&mut state, "abc");
    let typed = handle_event(&mut state, &Event::Char('d'));
    let generation = scheduled_generation(&typed).unwrap();
    let fired = handle_event(&mut state, &Event::DebounceElapsed { generation });

    assert_eq!(fired.actions[0], Action::CancelFetch { token: abc_token });
    let (abcd_token, query) = started_fetch(&fired).unwrap();
    assert_eq!(query, "abcd");
    assert_ne!(abc_token, abcd_token);

    complete(&mut state, abcd_token, Ok(hits("abcd", 2)));
    let late = complete(&mut state, abc_token, Ok(hits("abc", 4)));

    assert!(!late.should_render);
    assert_eq!(labels(&state), vec!["abcd story 0", "abcd story 1"]);
}

#[test]
fn only_one_request_is_ever_current() {
    let mut state = new_state();
    let mut issued = Vec::new();

    for query in ["rus", "rust", "rusty", "rustc"] {
        let (token, _) = type_and_settle(&mut state, query);
        issued.push(token);
        assert_eq!(state.in_flight(), Some(token));
    }

    issued.sort();
    issued.dedup();
    assert_eq!(issued.len(), 4);
}

#[test]
fn failure_keeps_stale_suggestions_and_clears_loading() {
    let mut state = new_state();
    let (token, _) = type_and_settle(&mut state, "rust");
    complete(&mut state, token, Ok(hits("rust", 2)));

    let (token, _) = type_and_settle(&mut state, "rusty");
    let transition = complete(&mut state, token, Err(FetchError::Status(503)));

    assert!(transition.should_render);
    assert!(!state.loading);
    assert_eq!(labels(&state), vec!["rust story 0", "rust story 1"]);
}

#[test]
fn cancellation_is_silent() {
    let mut state = new_state();
    let (token, _) = type_and_settle(&mut state, "rust");

    complete(&mut state, token, Err(FetchError::Cancelled));

    assert!(!state.loading);
    assert!(state.suggestions.is_empty());
}

#[test]
fn arrow_keys_wrap_at_both_ends() {
    let mut state = new_state();
    for value in ["c", "b", "a"] {
        state.history.commit(value);
    }
    handle_event(&mut state, &Event::Input(String::new()));

    let down = |state: &mut AppState| handle_event(state, &Event::Key(Key::ArrowDown));
    let up = |state: &mut AppState| handle_event(state, &Event::Key(Key::ArrowUp));

    assert!(down(&mut state).default_prevented);
    assert_eq!(state.active_index, Some(0));
    down(&mut state);
    down(&mut state);
    assert_eq!(state.active_index, Some(2));
    down(&mut state);
    assert_eq!(state.active_index, Some(0));
    up(&mut state);
    assert_eq!(state.active_index, Some(2));
}

#[test]
fn keys_do_nothing_on_empty_candidate_list() {
    let mut state = new_state();

    for key in [Key::ArrowDown, Key::ArrowUp, Key::Enter, Key::Escape] {
        let transition = handle_event(&mut state, &Event::Key(key));
        assert_eq!(transition, Transition::default());
    }
    assert_eq!(state.active_index, None);
}

#[test]
fn enter_on_selection_commits_and_prevents_default() {
    let mut state = new_state();
    let (token, _) = type_and_settle(&mut state, "rust");
    complete(&mut state, token, Ok(hits("rust", 3)));

    handle_event(&mut state, &Event::Key(Key::ArrowDown));
    handle_event(&mut state, &Event::Key(Key::ArrowDown));
    let transition = handle_event(&mut state, &Event::Key(Key::Enter));

    assert!(transition.default_prevented);
    assert_eq!(transition.actions, vec![Action::Navigate("rust story 1".to_string())]);
    assert_eq!(state.history.entries(), ["rust story 1"]);
    assert_eq!(state.active_index, None);
}

#[test]
fn enter_without_selection_is_left_to_the_host() {
    let mut state = new_state();
    state.history.commit("older");
    handle_event(&mut state, &Event::Input("x".to_string()));

    let transition = handle_event(&mut state, &Event::Key(Key::Enter));
    assert!(!transition.default_prevented);
    assert!(transition.actions.is_empty());

    let submitted = handle_event(&mut state, &Event::Commit("x".to_string()));
    assert_eq!(submitted.actions, vec![Action::Navigate("x".to_string())]);
    assert_eq!(state.history.entries(), ["x", "older"]);
}

#[test]
fn commit_promotes_existing_history_entry() {
    let mut state = new_state();
    for value in ["baz", "foo", "bar"] {
        state.history.commit(value);
    }
    assert_eq!(state.history.entries(), ["bar", "foo", "baz"]);

    handle_event(&mut state, &Event::Commit("foo".to_string()));

    assert_eq!(state.history.entries(), ["foo", "bar", "baz"]);
}

#[test]
fn empty_commit_is_ignored() {
    let mut state = new_state();

    let transition = handle_event(&mut state, &Event::Commit("   ".to_string()));

    assert!(transition.actions.is_empty());
    assert!(state.history.is_empty());
}

#[test]
fn escape_clears_selection_and_suggestions_but_keeps_history() {
    let mut state = new_state();
    state.history.commit("older");
    let (token, _) = type_and_settle(&mut state, "rust");
    complete(&mut state, token, Ok(hits("rust", 2)));
    handle_event(&mut state, &Event::Key(Key::ArrowDown));

    handle_event(&mut state, &Event::Key(Key::Escape));

    assert_eq!(state.active_index, None);
    assert!(state.suggestions.is_empty());
    assert_eq!(state.history.entries(), ["older"]);
}

#[test]
fn blur_hides_history_and_clears_selection() {
    let mut state = new_state();
    state.history.commit("older");
    handle_event(&mut state, &Event::Key(Key::ArrowDown));
    assert_eq!(state.active_index, Some(0));

    handle_event(&mut state, &Event::Blur);

    assert_eq!(state.active_index, None);
    assert!(state.candidates().is_empty());

    handle_event(&mut state, &Event::Focus);
    assert_eq!(labels(&state), vec!["older"]);
}

#[test]
fn hover_and_activate_use_candidate_indices() {
    let mut state = new_state();
    for value in ["b", "a"] {
        state.history.commit(value);
    }

    handle_event(&mut state, &Event::Hover(1));
    assert_eq!(state.active_index, Some(1));

    let out_of_range = handle_event(&mut state, &Event::Hover(9));
    assert!(!out_of_range.should_render);
    assert_eq!(state.active_index, Some(1));

    let activated = handle_event(&mut state, &Event::Activate(1));
    assert_eq!(activated.actions, vec![Action::Navigate("b".to_string())]);
    assert_eq!(state.history.entries(), ["b", "a"]);
}

#[test]
fn active_index_stays_in_bounds_when_list_changes() {
    let mut state = new_state();
    let (token, _) = type_and_settle(&mut state, "rust");
    complete(&mut state, token, Ok(hits("rust", 5)));
    handle_event(&mut state, &Event::Key(Key::ArrowUp));
    assert_eq!(state.active_index, Some(4));

    let (token, _) = type_and_settle(&mut state, "rusty");
    assert_eq!(state.active_index, None);
    complete(&mut state, token, Ok(hits("rusty", 1)));

    let count = state.candidates().len();
    assert!(state.active_index.map_or(true, |i| i < count));
}

#[test]
fn toggle_theme_switches_palette() {
    let mut state = new_state();
    let before = state.theme.name.clone();

    let transition = handle_event(&mut state, &Event::ToggleTheme);

    assert!(transition.should_render);
    assert_ne!(state.theme.name, before);
}
