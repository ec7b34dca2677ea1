//! Boundary to the external scanner.
//!
//! Scanning produces `(name, expiry date)` pairs that are fed into the app
//! layer as [`crate::app::Event::ScanCompleted`]. No recognition happens here.
//!
//! - `messages`: Result payloads and their JSON form
//! - `scanner`: The [`Scanner`] trait and a scripted stand-in

pub mod messages;
pub mod scanner;

pub use messages::{ScanMode, ScanResult};
pub use scanner::{Scanner, ScriptedScanner};
