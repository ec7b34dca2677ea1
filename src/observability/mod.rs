//! File-based structured logging.
//!
//! `tracing` spans and events from every layer are formatted by a
//! `tracing-subscriber` fmt layer and appended to `foodsafe.log` in the data
//! directory. Nothing is written to the terminal, which belongs to the UI.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → foodsafe.log (+ rotated backups)
//! ```
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use init::init_tracing;
