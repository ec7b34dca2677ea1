//! Theme management and ANSI escape sequence generation.
//!
//! Themes are either built in (`fridge-dark`, `fridge-light`) or loaded from
//! a TOML file. Colors are hex strings converted to 24-bit ANSI sequences.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! tag_selected_fg = "#1e1e2e"
//! tag_selected_bg = "#a6e3a1"
//! search_bar_border = "#f5c2e7"
//! expired_fg = "#f38ba8"
//! today_fg = "#fab387"
//! soon_fg = "#f9e2af"
//! fresh_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use foodsafe::ui::theme::Theme;
//!
//! let theme = Theme::from_name("fridge-light").unwrap();
//! let line = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(line.starts_with("\u{1b}[1m"));
//! assert!(Theme::fg(&theme.colors.header_fg).starts_with("\u{1b}[38;2;"));
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{FoodError, Result};
use crate::domain::food::ExpiryLevel;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "fridge-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    pub text_normal: String,
    /// Footer, dates and placeholders.
    pub text_dim: String,
    pub border: String,

    /// Row under the cursor.
    pub selection_fg: String,
    pub selection_bg: String,

    /// Chip of the selected tag.
    pub tag_selected_fg: String,
    pub tag_selected_bg: String,

    pub search_bar_border: String,

    pub expired_fg: String,
    pub today_fg: String,
    pub soon_fg: String,
    pub fresh_fg: String,

    /// Inline dialog validation messages.
    pub error_fg: String,
    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "fridge-dark" => include_str!("../../themes/fridge-dark.toml"),
            "fridge-light" => include_str!("../../themes/fridge-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::Io`] if the file cannot be read and
    /// [`FoodError::Config`] if its content is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| FoodError::Config(format!("invalid theme: {e}")))
    }

    /// Foreground color for an expiry level.
    #[must_use]
    pub fn level_color(&self, level: ExpiryLevel) -> &str {
        match level {
            ExpiryLevel::Expired => &self.colors.expired_fg,
            ExpiryLevel::Today => &self.colors.today_fg,
            ExpiryLevel::Soon => &self.colors.soon_fg,
            ExpiryLevel::Fresh => &self.colors.fresh_fg,
        }
    }

    /// Converts a hex color to RGB; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence, `\x1b[38;2;r;g;bm`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence, `\x1b[48;2;r;g;bm`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    fn fallback() -> Self {
        let hex = String::from;
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: hex("#cdd6f4"),
                text_normal: hex("#cdd6f4"),
                text_dim: hex("#6c7086"),
                border: hex("#45475a"),
                selection_fg: hex("#1e1e2e"),
                selection_bg: hex("#89b4fa"),
                tag_selected_fg: hex("#1e1e2e"),
                tag_selected_bg: hex("#a6e3a1"),
                search_bar_border: hex("#f5c2e7"),
                expired_fg: hex("#f38ba8"),
                today_fg: hex("#fab387"),
                soon_fg: hex("#f9e2af"),
                fresh_fg: hex("#a6e3a1"),
                error_fg: hex("#f38ba8"),
                empty_state_fg: hex("#89b4fa"),
            },
        }
    }
}

impl Default for Theme {
    /// The `fridge-dark` theme.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}
