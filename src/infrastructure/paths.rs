//! Config and data directory resolution.
//!
//! Follows the XDG base directory layout: `$XDG_CONFIG_HOME/foodsafe` and
//! `$XDG_DATA_HOME/foodsafe`, falling back to `~/.config/foodsafe` and
//! `~/.local/share/foodsafe` when the variables are unset or empty.

use std::path::PathBuf;

const APP_DIR: &str = "foodsafe";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Joins `foodsafe` onto the XDG directory, or onto `home/<fallback>`.
fn resolve_app_dir(xdg: Option<String>, home: Option<String>, fallback: &str) -> Option<PathBuf> {
    let non_empty = |value: String| (!value.trim().is_empty()).then_some(value);

    xdg.and_then(non_empty)
        .map(PathBuf::from)
        .or_else(|| home.and_then(non_empty).map(|home| PathBuf::from(home).join(fallback)))
        .map(|base| base.join(APP_DIR))
}

/// Returns the configuration directory, e.g. `~/.config/foodsafe`.
///
/// Without `XDG_CONFIG_HOME` and `HOME`, a relative `foodsafe` directory is used.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    resolve_app_dir(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
        ".config",
    )
    .unwrap_or_else(|| PathBuf::from(APP_DIR))
}

/// Returns the data directory holding the log file, e.g. `~/.local/share/foodsafe`.
///
/// Without `XDG_DATA_HOME` and `HOME`, a directory under the system temp dir is used.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_app_dir(
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
        ".local/share",
    )
    .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
}

/// Default location of the config file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths without a tilde, and all paths when `HOME` is unset, are returned
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match std::env::var("HOME") {
        Ok(home) => expand_tilde_with(path, &home),
        Err(_) => path.to_string(),
    }
}

fn expand_tilde_with(path: &str, home: &str) -> String {
    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = resolve_app_dir(Some("/xdg".into()), Some("/home/kim".into()), ".config");
        assert_eq!(dir, Some(PathBuf::from("/xdg/foodsafe")));
    }

    #[test]
    fn empty_xdg_falls_back_to_home() {
        let dir = resolve_app_dir(Some(String::new()), Some("/home/kim".into()), ".local/share");
        assert_eq!(dir, Some(PathBuf::from("/home/kim/.local/share/foodsafe")));
        assert_eq!(resolve_app_dir(None, None, ".config"), None);
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde_with("~/food.toml", "/home/kim"), "/home/kim/food.toml");
        assert_eq!(expand_tilde_with("~", "/home/kim/"), "/home/kim/");
        assert_eq!(expand_tilde_with("/etc/food.toml", "/home/kim"), "/etc/food.toml");
        assert_eq!(expand_tilde_with("~kim/x", "/home/kim"), "~kim/x");
    }
}
