//! Error types for the food tracker.
//!
//! This module defines the centralized error type [`FoodError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Every variant is recoverable: a rejected operation leaves the inventory and
//! tag registry exactly as they were before the call.

use thiserror::Error;

/// The main error type for inventory, tag and dialog operations.
///
/// # Examples
///
/// ```
/// use foodsafe::FoodError;
///
/// fn check_name(name: &str) -> Result<(), FoodError> {
///     if name.trim().is_empty() {
///         return Err(FoodError::Validation("food name must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check_name("  ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum FoodError {
    /// Input was rejected before any state changed.
    ///
    /// Covers empty names, blank or duplicate tags, references to tags that are
    /// not registered, malformed dates and malformed scan payloads. Dialogs
    /// report this inline and stay open.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced an item id or tag that no longer exists.
    ///
    /// In the single-threaded event model this indicates a stale reference
    /// that should have been cleared when the target was deleted.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FoodError {
    /// Returns `true` for [`FoodError::Validation`].
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A specialized `Result` type for food tracker operations.
pub type Result<T> = std::result::Result<T, FoodError>;
