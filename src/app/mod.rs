//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the line driver (main.rs) and the domain/pantry
//! layers. Every user gesture and scanner callback becomes an [`Event`];
//! [`handle_event`] mutates [`AppState`] and returns [`Action`]s for the
//! driver to execute.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Scanner Results ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Dialog state machine types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use foodsafe::app::{handle_event, AppState, Event};
//! use foodsafe::pantry::Pantry;
//! use foodsafe::ui::theme::Theme;
//!
//! let mut state = AppState::new(Pantry::with_tags(["나의 냉장고"]), Theme::default());
//! let (redraw, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(redraw);
//! assert!(actions.is_empty());
//! # Ok::<(), foodsafe::FoodError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{ItemDraft, ItemField, ManualDraft, ManualField, Modal};
pub use state::{manual_entry, AppState};
