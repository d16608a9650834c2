//! hnsearch: a terminal front-end for Hacker News search.
//!
//! The heart of the crate is an incremental search box: typing issues
//! debounced, cancellable queries against the Algolia HN API, the dropdown
//! merges live suggestions with session history, and the keyboard drives an
//! active-candidate cursor. Committing a value navigates to the search results
//! listing. Front page, category and item/comment views are plain renderers on
//! top of the same HTTP client.

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shim (main.rs)                            │  ← clap + crossterm
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← tokio timers/tasks
//! │  - Executes controller actions                      │
//! │  - Feeds completions back as events                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Pure state machine
//! │  - Event handling, debounce generations, tokens     │
//! │  - Candidate derivation, history                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────────┐
//! │ UI Layer      │   │ Provider Layer    │
//! │ (ui/)         │   │ (provider/)       │
//! │ - View models │   │ - SearchProvider  │
//! │ - Components  │   │ - Algolia client  │
//! │ - Theming     │   │                   │
//! └───────────────┘   └───────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure & Observability             │
//! │  - Stories, items, errors (domain/)                 │
//! │  - XDG paths (infrastructure/)                      │
//! │  - OTLP file tracing (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Search controller state machine
//! - [`domain`]: Story/item types and errors
//! - [`provider`]: Search provider trait and the Algolia HN client
//! - [`runtime`]: Tokio executor for controller actions, navigation routes
//! - [`ui`]: ANSI rendering with theme support
//! - [`infrastructure`]: Config and data directory resolution
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! `$XDG_CONFIG_HOME/hnsearch/config.toml` (usually `~/.config/hnsearch/config.toml`,
//! or `$HNSEARCH_CONFIG_DIR/config.toml` when that is set):
//!
//! ```toml
//! debounce_ms = 250
//! max_suggestions = 8
//! theme = "hn-light"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use hnsearch::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! handle_event(&mut state, &Event::Focus);
//! let transition = handle_event(&mut state, &Event::Input("rust".to_string()));
//!
//! assert!(matches!(transition.actions[0], Action::ScheduleDebounce { .. }));
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod provider;
pub mod runtime;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Key, RequestToken, SearchSettings, Transition};
pub use domain::{HnSearchError, Item, Result, StoryHit};
pub use provider::{FetchError, HnClient, SearchProvider};
pub use runtime::{ChannelNavigator, Navigator, Route, SearchRuntime};
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration.
///
/// Every key is optional; unknown keys are rejected so typos surface early.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Algolia HN API root. Default: `https://hn.algolia.com/api/v1`
    pub api_base_url: String,

    /// Quiescence delay before a suggestion fetch. Default: 300
    pub debounce_ms: u64,

    /// Query length (chars) that turns on suggestions. Default: 3
    pub min_query_len: usize,

    /// Suggestions kept per response. Default: 5
    pub max_suggestions: usize,

    /// Session history bound, `0` for unbounded. Default: 50
    pub history_limit: usize,

    /// HTTP timeout for every request. Default: 10
    pub request_timeout_secs: u64,

    /// Built-in theme: `hn-dark` or `hn-light`. Ignored if `theme_file` is set.
    pub theme: String,

    /// Custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive enabling trace export, e.g. `"debug"`. Off when unset.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: provider::algolia::DEFAULT_BASE_URL.to_string(),
            debounce_ms: 300,
            min_query_len: 3,
            max_suggestions: 5,
            history_limit: 50,
            request_timeout_secs: 10,
            theme: ui::theme::DARK.to_string(),
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HnSearchError::Io`] if the file exists but cannot be read, and
    /// [`HnSearchError::Config`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&contents)
            .map_err(|e| HnSearchError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads from the default location, `<config_dir>/hnsearch/config.toml`.
    ///
    /// Without a config directory there is nothing to read, so defaults are used.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_default() -> Result<Self> {
        match infrastructure::config_file() {
            Ok(path) => Self::load(&path),
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Builds configuration from string key/value pairs.
    ///
    /// Keys that are missing or fail to parse keep their default; unknown keys
    /// are ignored.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hnsearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    /// map.insert("max_suggestions".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 150);
    /// assert_eq!(config.max_suggestions, 5);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str, default: T) -> T {
            map.get(key)
                .and_then(|s| s.trim().parse::<T>().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            debounce_ms: parsed(map, "debounce_ms", defaults.debounce_ms),
            min_query_len: parsed(map, "min_query_len", defaults.min_query_len),
            max_suggestions: parsed(map, "max_suggestions", defaults.max_suggestions),
            history_limit: parsed(map, "history_limit", defaults.history_limit),
            request_timeout_secs: parsed(map, "request_timeout_secs", defaults.request_timeout_secs),
            theme: text("theme").unwrap_or(defaults.theme),
            theme_file: text("theme_file").map(PathBuf::from),
            trace_level: text("trace_level"),
        }
    }

    /// Controller tunables derived from this configuration.
    #[must_use]
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            min_query_len: self.min_query_len,
            max_suggestions: self.max_suggestions,
            history_limit: self.history_limit,
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves the theme: `theme_file`, then `theme`, then `hn-dark`.
    ///
    /// Failures are logged and fall back to the default rather than aborting.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file.display(), error = %e, "failed to load theme file, using default");
                }
            }
        }

        Theme::from_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme, using default");
            Theme::default()
        })
    }
}

/// Builds the initial, unfocused search state for `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        debounce_ms = config.debounce_ms,
        min_query_len = config.min_query_len,
        "initializing search state"
    );
    AppState::new(config.search_settings(), config.resolve_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 120\ntheme = \"hn-light\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 120);
        assert_eq!(config.min_query_len, 3);
        assert_eq!(config.resolve_theme().name, "hn-light");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce = 120").unwrap();

        assert!(matches!(Config::load(file.path()), Err(HnSearchError::Config(_))));
    }

    #[test]
    fn map_values_fall_back_per_key() {
        let map: BTreeMap<String, String> = [
            ("history_limit", "0"),
            ("min_query_len", "-1"),
            ("theme_file", "  "),
            ("trace_level", "hnsearch=debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.min_query_len, 3);
        assert_eq!(config.theme_file, None);
        assert_eq!(config.trace_level.as_deref(), Some("hnsearch=debug"));
    }

    #[test]
    fn settings_and_theme_flow_into_state() {
        let config = Config {
            debounce_ms: 50,
            theme: "nope".to_string(),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.settings().debounce, Duration::from_millis(50));
        assert_eq!(state.theme.name, "hn-dark");
    }
}
