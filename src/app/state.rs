//! Search controller state and derived candidate list.
//!
//! [`AppState`] is the single source of truth for the search box: the query, the
//! last applied suggestions, history, focus, the active candidate and the
//! bookkeeping needed to reject stale timers and responses.
//!
//! # Derived state
//!
//! The candidate list is never stored. [`AppState::candidates`] recomputes it
//! from `(query, suggestions, history, is_focused)` on every call, so it cannot
//! drift from its inputs. The active index is cleared by every transition that
//! changes which list is shown or what it contains.
//!
//! # Staleness guards
//!
//! - `query_generation` is bumped on every query change. A debounce timer only
//!   fires a fetch if its generation is still current.
//! - `in_flight` names the one request whose completion may be applied.

use super::actions::RequestToken;
use super::history::History;
use super::modes::CandidateSource;
use crate::domain::StoryHit;
use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Tunables for the search controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiescence delay before a fetch is issued.
    pub debounce: Duration,
    /// Minimum query length (in chars) that triggers suggestions.
    pub min_query_len: usize,
    /// Maximum number of suggestions kept from a response.
    pub max_suggestions: usize,
    /// History bound; `0` disables eviction.
    pub history_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: 3,
            max_suggestions: 5,
            history_limit: 50,
        }
    }
}

/// A provider hit reduced to what the dropdown shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
}

impl From<StoryHit> for Suggestion {
    fn from(hit: StoryHit) -> Self {
        Self {
            id: hit.object_id,
            label: hit.title,
        }
    }
}

/// One selectable dropdown row, whichever list it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub label: String,
}

/// Central search controller state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current input text.
    pub query: String,

    /// Last successfully applied suggestions, provider order, already truncated.
    pub suggestions: Vec<Suggestion>,

    /// Committed values, most recent first.
    pub history: History,

    /// Whether the input has focus.
    pub is_focused: bool,

    /// Index into [`AppState::candidates`], `None` when nothing is selected.
    pub active_index: Option<usize>,

    /// A fetch for the current query is outstanding.
    pub loading: bool,

    /// Color scheme for rendering.
    pub theme: Theme,

    pub(crate) settings: SearchSettings,
    pub(crate) query_generation: u64,
    pub(crate) debounce_pending: bool,
    pub(crate) in_flight: Option<RequestToken>,
    next_request_id: u64,
}

impl AppState {
    /// Creates an unfocused, empty search box.
    #[must_use]
    pub fn new(settings: SearchSettings, theme: Theme) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            history: History::new(settings.history_limit),
            is_focused: false,
            active_index: None,
            loading: false,
            theme,
            settings,
            query_generation: 0,
            debounce_pending: false,
            in_flight: None,
            next_request_id: 0,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Token of the request whose result may still be applied, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// Whether a quiescence timer is currently armed.
    #[must_use]
    pub const fn debounce_pending(&self) -> bool {
        self.debounce_pending
    }

    /// Whether the query is long enough to drive suggestions.
    #[must_use]
    pub fn query_is_active(&self) -> bool {
        self.query.chars().count() >= self.settings.min_query_len
    }

    /// Which list the dropdown shows right now.
    #[must_use]
    pub fn candidate_source(&self) -> CandidateSource {
        if self.query_is_active() {
            CandidateSource::Suggestions
        } else if self.is_focused {
            CandidateSource::History
        } else {
            CandidateSource::Hidden
        }
    }

    /// The current candidate list, derived from query, suggestions, history and focus.
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate> {
        match self.candidate_source() {
            CandidateSource::Suggestions => self
                .suggestions
                .iter()
                .map(|s| Candidate {
                    id: s.id.clone(),
                    label: s.label.clone(),
                })
                .collect(),
            CandidateSource::History => self
                .history
                .entries()
                .iter()
                .map(|h| Candidate {
                    id: h.clone(),
                    label: h.clone(),
                })
                .collect(),
            CandidateSource::Hidden => Vec::new(),
        }
    }

    /// Number of candidates without materialising the list.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        match self.candidate_source() {
            CandidateSource::Suggestions => self.suggestions.len(),
            CandidateSource::History => self.history.len(),
            CandidateSource::Hidden => 0,
        }
    }

    /// The candidate under the keyboard cursor, if any.
    #[must_use]
    pub fn active_candidate(&self) -> Option<Candidate> {
        self.active_index
            .and_then(|idx| self.candidates().into_iter().nth(idx))
    }

    /// Moves the active index forward, wrapping to the first candidate.
    ///
    /// From no selection the first press lands on index 0. No-op on an empty list.
    pub fn move_selection_down(&mut self) {
        let count = self.candidate_count();
        if count == 0 {
            return;
        }
        self.active_index = Some(match self.active_index {
            Some(idx) if idx + 1 < count => idx + 1,
            _ => 0,
        });
    }

    /// Moves the active index backward, wrapping to the last candidate.
    ///
    /// From no selection the first press lands on the last index. No-op on an
    /// empty list.
    pub fn move_selection_up(&mut self) {
        let count = self.candidate_count();
        if count == 0 {
            return;
        }
        self.active_index = Some(match self.active_index {
            Some(idx) if idx > 0 && idx < count => idx - 1,
            _ => count - 1,
        });
    }

    /// Clears the keyboard selection.
    pub fn reset_selection(&mut self) {
        self.active_index = None;
    }

    /// Replaces suggestions with the first `max_suggestions` hits.
    pub(crate) fn apply_hits(&mut self, hits: Vec<StoryHit>) {
        self.suggestions = hits
            .into_iter()
            .take(self.settings.max_suggestions)
            .map(Suggestion::from)
            .collect();
        self.active_index = None;
    }

    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.query_generation = self.query_generation.wrapping_add(1);
        self.query_generation
    }

    pub(crate) fn issue_token(&mut self) -> RequestToken {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        RequestToken::new(self.next_request_id)
    }

    /// Computes the search box view model for a terminal of `rows` x `cols`.
    ///
    /// The dropdown is windowed around the active candidate when the list is taller
    /// than the space left after the header, search bar and footer.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> crate::ui::viewmodel::UIViewModel {
        use crate::ui::viewmodel::{DisplayItem, DropdownInfo, FooterInfo, HeaderInfo, SearchBarInfo, StatusLine};

        let candidates = self.candidates();
        let available_rows = Self::calculate_available_rows(rows).max(1);

        let anchor = self.active_index.unwrap_or(0);
        let mut visible_start = anchor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(candidates.len());
        if visible_end - visible_start < available_rows && candidates.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = (self.candidate_source() == CandidateSource::Suggestions)
            .then(SkimMatcherV2::default);
        let max_label = cols.saturating_sub(crate::ui::components::DROPDOWN_INSET * 2 + 2);

        let items = candidates[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, candidate)| {
                let absolute_idx = visible_start + relative_idx;
                let label = truncate_chars(&candidate.label, max_label);
                let highlight_ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&label, m));
                DisplayItem {
                    label,
                    is_active: self.active_index == Some(absolute_idx),
                    highlight_ranges,
                }
            })
            .collect::<Vec<_>>();

        let status = if self.loading {
            Some(StatusLine::loading())
        } else if !items.is_empty() {
            None
        } else if self.candidate_source() == CandidateSource::History {
            Some(StatusLine::no_history())
        } else if self.query_is_active() && self.is_focused {
            Some(StatusLine::no_results())
        } else {
            None
        };

        crate::ui::viewmodel::UIViewModel {
            header: HeaderInfo {
                title: " Hacker News Search ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                is_focused: self.is_focused,
            },
            dropdown: DropdownInfo {
                items,
                status,
                offset: visible_start,
            },
            footer: self.compute_footer(),
        }
    }

    /// Coalesces fuzzy match positions of the query into `(start, end)` char ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_footer(&self) -> crate::ui::viewmodel::FooterInfo {
        let keybindings = match self.candidate_source() {
            CandidateSource::Hidden => "Tab: focus  Ctrl+n: browse  Ctrl+r: trending  Ctrl+t: theme  Ctrl+c: quit",
            _ if self.candidate_count() == 0 => "Type 3+ chars to search  Enter: search  Ctrl+n: browse  Ctrl+c: quit",
            _ => "↑/↓: navigate  Enter: open  Esc: clear  Tab: blur  Ctrl+t: theme  Ctrl+c: quit",
        };
        crate::ui::viewmodel::FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for dropdown entries after blank line, header, border, search
    /// bar (3), border and footer.
    const fn calculate_available_rows(total_rows: usize) -> usize {
        total_rows.saturating_sub(8)
    }
}

/// Truncates to at most `max` chars, marking the cut with an ellipsis.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(SearchSettings::default(), Theme::default())
    }

    fn with_suggestions(labels: &[&str]) -> AppState {
        let mut state = state();
        state.query = "rust".to_string();
        state.suggestions = labels
            .iter()
            .enumerate()
            .map(|(i, l)| Suggestion {
                id: i.to_string(),
                label: (*l).to_string(),
            })
            .collect();
        state
    }

    #[test]
    fn candidates_follow_query_length_then_focus() {
        let mut state = state();
        state.history.commit("tokio");
        state.suggestions = vec![Suggestion {
            id: "1".into(),
            label: "stale".into(),
        }];

        state.query = "re".into();
        assert_eq!(state.candidate_source(), CandidateSource::Hidden);
        assert!(state.candidates().is_empty());

        state.is_focused = true;
        assert_eq!(state.candidate_source(), CandidateSource::History);
        assert_eq!(state.candidates()[0].label, "tokio");

        state.query = "rea".into();
        assert_eq!(state.candidate_source(), CandidateSource::Suggestions);
        assert_eq!(state.candidates()[0].id, "1");
    }

    #[test]
    fn query_length_counts_chars_not_bytes() {
        let mut state = state();
        state.query = "日本".into();
        assert!(!state.query_is_active());
        state.query = "日本語".into();
        assert!(state.query_is_active());
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = with_suggestions(&["a", "b", "c"]);

        state.move_selection_down();
        assert_eq!(state.active_index, Some(0));

        state.active_index = Some(2);
        state.move_selection_down();
        assert_eq!(state.active_index, Some(0));

        state.move_selection_up();
        assert_eq!(state.active_index, Some(2));

        state.active_index = None;
        state.move_selection_up();
        assert_eq!(state.active_index, Some(2));
    }

    #[test]
    fn selection_is_noop_on_empty_list() {
        let mut state = state();
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.active_index, None);
    }

    #[test]
    fn apply_hits_truncates_and_clears_selection() {
        let mut state = with_suggestions(&["old"]);
        state.active_index = Some(0);

        let hits = (0..7).map(|i| StoryHit::new(i.to_string(), format!("hit {i}"))).collect();
        state.apply_hits(hits);

        assert_eq!(state.suggestions.len(), 5);
        assert_eq!(state.suggestions[4].label, "hit 4");
        assert_eq!(state.active_index, None);
    }

    #[test]
    fn viewmodel_shows_loading_before_items() {
        let mut state = with_suggestions(&["rust in production"]);
        state.is_focused = true;
        state.loading = true;

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.dropdown.items.len(), 1);
        assert_eq!(vm.dropdown.status.unwrap().message, "Loading suggestions…");
    }

    #[test]
    fn viewmodel_reports_empty_history_when_focused() {
        let mut state = state();
        state.is_focused = true;

        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.dropdown.items.is_empty());
        assert_eq!(vm.dropdown.status.unwrap().message, "No search history yet");
    }

    #[test]
    fn viewmodel_highlights_query_matches_in_suggestions() {
        let mut state = with_suggestions(&["Rust 2024 edition"]);
        state.active_index = Some(0);

        let vm = state.compute_viewmodel(24, 80);
        let item = &vm.dropdown.items[0];
        assert!(item.is_active);
        assert_eq!(item.highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn viewmodel_windows_long_history_around_selection() {
        let mut state = state();
        state.is_focused = true;
        for i in 0..30 {
            state.history.commit(&format!("query {i}"));
        }
        state.active_index = Some(25);

        let vm = state.compute_viewmodel(18, 80);
        assert_eq!(vm.dropdown.items.len(), 10);
        assert_eq!(vm.dropdown.items.iter().filter(|i| i.is_active).count(), 1);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 6), "héllo…");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
