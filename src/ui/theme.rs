//! Theme management and ANSI escape sequence generation.
//!
//! Two palettes ship with the binary, `hn-dark` (default) and `hn-light`, and
//! [`Theme::toggled`] flips between them. Custom palettes can be loaded from a
//! TOML file with the same shape:
//!
//! ```toml
//! name = "my-theme"
//! appearance = "dark"
//!
//! [colors]
//! header_fg = "#ff6600"
//! selection_fg = "#111827"
//! selection_bg = "#ea580c"
//! text_normal = "#e5e7eb"
//! text_dim = "#6b7280"
//! border = "#374151"
//! search_bar_border = "#4b5563"
//! search_bar_focus = "#f97316"
//! match_highlight_fg = "#111827"
//! match_highlight_bg = "#fdba74"
//! status_fg = "#9ca3af"
//! meta_fg = "#9ca3af"
//! link_fg = "#fb923c"
//! error_fg = "#ef4444"
//! ```

use crate::domain::{HnSearchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the built-in dark palette.
pub const DARK: &str = "hn-dark";

/// Name of the built-in light palette.
pub const LIGHT: &str = "hn-light";

/// Whether a palette is meant for dark or light backgrounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Background family; drives [`Theme::toggled`].
    #[serde(default)]
    pub appearance: Appearance,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Hex color definitions (e.g. `"#ff6600"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    pub text_dim: String,

    pub border: String,

    /// Search box frame when unfocused.
    pub search_bar_border: String,
    /// Search box frame when focused.
    pub search_bar_focus: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// "Loading…" and empty-state lines.
    pub status_fg: String,
    /// Points/comments/author line under story titles.
    pub meta_fg: String,
    pub link_fg: String,
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`hn-dark` or `hn-light`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            DARK => include_str!("../../themes/hn-dark.toml"),
            LIGHT => include_str!("../../themes/hn-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`HnSearchError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| HnSearchError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| HnSearchError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// The built-in theme of the opposite appearance.
    ///
    /// Custom themes toggle to the built-in palette of the other family.
    #[must_use]
    pub fn toggled(&self) -> Self {
        let target = match self.appearance {
            Appearance::Dark => LIGHT,
            Appearance::Light => DARK,
        };
        Self::from_name(target).unwrap_or_else(|| self.clone())
    }

    /// Builds a 24-bit SGR sequence; `layer` is 38 for foreground, 48 for background.
    ///
    /// Anything other than `#rrggbb` renders as white.
    fn truecolor(layer: u8, hex: &str) -> String {
        let digits = hex.trim().trim_start_matches('#');
        let rgb = if digits.len() == 6 {
            u32::from_str_radix(digits, 16).unwrap_or(0x00ff_ffff)
        } else {
            0x00ff_ffff
        };
        let [_, r, g, b] = rgb.to_be_bytes();
        format!("\u{1b}[{layer};2;{r};{g};{b}m")
    }

    /// Foreground escape for a `#rrggbb` color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::truecolor(38, hex)
    }

    /// Background escape for a `#rrggbb` color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::truecolor(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns `hn-dark`.
    ///
    /// # Panics
    ///
    /// Panics if the embedded palette fails to parse, which the unit tests rule out.
    fn default() -> Self {
        Self::from_name(DARK).expect("built-in hn-dark theme should always parse")
    }
}
