//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel(today) → UIViewModel → render_to_string → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Frame rendering
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    DialogField, DialogView, EmptyState, FooterInfo, HeaderInfo, ItemRow, SearchBarInfo, TagChip,
    UIViewModel,
};
