//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! driver executes them in order; the handler itself never touches the
//! terminal or the scanner.

use crate::scan::ScanMode;

/// Commands produced by the event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the application.
    Quit,

    /// Ask the external scanner for a result in the given mode.
    ///
    /// The driver feeds whatever comes back as
    /// [`Event::ScanCompleted`](crate::app::Event::ScanCompleted).
    StartScan(ScanMode),
}
