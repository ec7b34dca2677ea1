//! Foodsafe: a food expiry tracker organized by storage tags.
//!
//! Foodsafe keeps a list of food items, each filed under a user-defined tag
//! such as "나의 냉장고" or "편의점", and shows how many days remain until
//! each one expires:
//! - Tag registry with add, rename and delete, cascading to items
//! - Items listed per tag, soonest expiry first, with D-day countdowns
//! - Edit and delete dialogs with inline validation
//! - Scanner boundary feeding recognized `(name, date)` pairs, with a manual
//!   entry fallback
//!
//! State lives in memory for the lifetime of the process.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line Driver (main.rs)                              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Dialog modes                                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Pantry Layer  │   │ Scan Layer    │
//! │ (ui/)         │   │ (pantry/)     │   │ (scan/)       │
//! │ - Rendering   │   │ - Inventory   │   │ - Results     │
//! │ - Theming     │   │ - Tags        │   │ - Scanner API │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config/data paths (infrastructure/)              │
//! │  - Error types (domain/error)                       │
//! │  - Food model and dates (domain/food, domain/date)  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing-subscriber to a rotating log file        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Read from `$XDG_CONFIG_HOME/foodsafe/config.toml` or a path given on the
//! command line:
//!
//! ```toml
//! seed_tags = ["나의 냉장고", "편의점", "냉동실"]
//! theme = "fridge-light"
//! trace_level = "debug"
//! load_sample = true
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod pantry;
pub mod scan;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Modal};
pub use domain::{FoodError, FoodItem, ItemId, Result};
pub use pantry::Pantry;
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Tags registered when no configuration overrides them.
pub const DEFAULT_SEED_TAGS: [&str; 2] = ["나의 냉장고", "편의점"];

fn default_seed_tags() -> Vec<String> {
    DEFAULT_SEED_TAGS.iter().map(ToString::to_string).collect()
}

/// Application configuration.
///
/// Loaded from TOML with [`Config::load`] or from a flat key/value map with
/// [`Config::from_map`]. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tags registered at startup, in display order.
    ///
    /// Blank and duplicate names are skipped. Default: `["나의 냉장고", "편의점"]`
    pub seed_tags: Vec<String>,

    /// Log filter, e.g. `debug` or `foodsafe::pantry=trace`.
    ///
    /// `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// Built-in theme name: `fridge-dark` or `fridge-light`.
    ///
    /// Ignored if `theme_file` is set.
    #[serde(rename = "theme", alias = "theme_name")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` is expanded.
    pub theme_file: Option<String>,

    /// Whether to start with the demo inventory.
    pub load_sample: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_tags: default_seed_tags(),
            trace_level: None,
            theme_name: None,
            theme_file: None,
            load_sample: false,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map, e.g. command-line `key=value` pairs.
    ///
    /// # Parsing Rules
    ///
    /// - `seed_tags`: Comma-separated string → `Vec<String>` (empty entries dropped,
    ///   an empty list falls back to the default)
    /// - `load_sample`: `true` / `false` (anything else keeps the default)
    /// - `theme`, `theme_file`, `trace_level`: taken verbatim
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use foodsafe::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("seed_tags".to_string(), "냉장고, 냉동실,".to_string());
    /// map.insert("load_sample".to_string(), "true".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.seed_tags, vec!["냉장고", "냉동실"]);
    /// assert!(config.load_sample);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let seed_tags = config
            .get("seed_tags")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v: &Vec<String>| !v.is_empty())
            .unwrap_or_else(default_seed_tags);

        let load_sample = config
            .get("load_sample")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            seed_tags,
            trace_level: config.get("trace_level").cloned(),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            load_sample,
        }
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::Config`] if the file cannot be read or is not valid
    /// configuration TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FoodError::Config(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| FoodError::Config(format!("invalid config {}: {e}", path.display())))
    }
}

/// Builds the initial application state.
///
/// - Registers the seed tags (blank and duplicate names skipped)
/// - Loads the demo inventory when `load_sample` is set
/// - Resolves the theme: file, then name, then default; failures are logged
///   and fall back to the default theme
///
/// # Example
///
/// ```rust
/// use foodsafe::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.pantry.tags().tags(), ["나의 냉장고", "편의점"]);
/// assert_eq!(state.selected_tag.as_deref(), Some("나의 냉장고"));
/// assert!(state.pantry.inventory().is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize", seed_tags = config.seed_tags.len(), load_sample = config.load_sample).entered();

    let mut pantry = Pantry::with_tags(&config.seed_tags);
    if config.load_sample {
        crate::pantry::sample::load_sample(&mut pantry);
    }

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    tracing::info!(
        tags = pantry.tags().len(),
        items = pantry.inventory().len(),
        theme = %theme.name,
        "foodsafe initialized"
    );
    AppState::new(pantry, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_map_defaults() {
        let config = Config::from_map(&BTreeMap::new());
        assert_eq!(config, Config::default());

        let mut map = BTreeMap::new();
        map.insert("seed_tags".to_string(), " , ".to_string());
        map.insert("load_sample".to_string(), "yes".to_string());
        let config = Config::from_map(&map);
        assert_eq!(config.seed_tags, DEFAULT_SEED_TAGS);
        assert!(!config.load_sample);
    }

    #[test]
    fn load_toml_with_partial_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"fridge-light\"").unwrap();
        writeln!(file, "load_sample = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.theme_name.as_deref(), Some("fridge-light"));
        assert!(config.load_sample);
        assert_eq!(config.seed_tags, DEFAULT_SEED_TAGS);
    }

    #[test]
    fn load_rejects_bad_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_tags = \"not a list\"").unwrap();

        assert!(matches!(Config::load(file.path()), Err(FoodError::Config(_))));
        assert!(matches!(
            Config::load("/nonexistent/foodsafe.toml"),
            Err(FoodError::Config(_))
        ));
    }

    #[test]
    fn initialize_applies_seed_sample_and_theme() {
        let config = Config {
            seed_tags: vec!["냉장고".into(), " ".into(), "냉장고".into(), "냉동실".into()],
            theme_name: Some("fridge-light".into()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.pantry.tags().tags(), ["냉장고", "냉동실"]);
        assert_eq!(state.theme.name, "fridge-light");

        let state = initialize(&Config {
            load_sample: true,
            theme_name: Some("nope".into()),
            ..Config::default()
        });
        assert!(!state.pantry.inventory().is_empty());
        assert!(state.pantry.is_consistent());
        assert_eq!(state.theme, Theme::default());
    }
}
