//! Domain layer for the food tracker.
//!
//! This module contains the core domain types, independent of dialogs,
//! rendering or configuration.
//!
//! # Organization
//!
//! - [`date`]: Date formatting, parsing and the host clock
//! - [`error`]: Error types and result aliases
//! - [`food`]: Food item model and expiry derivation

pub mod date;
pub mod error;
pub mod food;

pub use error::{FoodError, Result};
pub use food::{parse_quantity, ExpiryLevel, FoodItem, FoodUpdate, ItemId};
