//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "foodsafe.log";

/// Resolves the filter directive: `RUST_LOG`, then `config.trace_level`, then `"info"`.
#[must_use]
pub fn filter_directive(config: &Config, env_value: Option<String>) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the tracing subscriber writing to a rotating log file.
///
/// The file is `foodsafe.log` in the data directory (see
/// [`get_data_dir`](crate::infrastructure::paths::get_data_dir)).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently returns if that fails, since logging is optional
/// - An invalid filter directive falls back to `"info"`
/// - Only the first call installs a subscriber; later calls do nothing
///
/// # Example
///
/// ```rust
/// use foodsafe::observability::init_tracing;
/// use foodsafe::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let directive = filter_directive(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_beats_config_beats_default() {
        let config = Config {
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };

        assert_eq!(filter_directive(&config, Some("trace".to_string())), "trace");
        assert_eq!(filter_directive(&config, Some("  ".to_string())), "debug");
        assert_eq!(filter_directive(&config, None), "debug");
        assert_eq!(filter_directive(&Config::default(), None), "info");
    }
}
