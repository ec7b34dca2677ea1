//! Scanner collaborator interface.
//!
//! Real recognition (camera, barcode, OCR) lives outside this crate. The
//! tracker only needs something that, when asked, may hand back a
//! [`ScanResult`].

use std::collections::VecDeque;

use super::messages::{ScanMode, ScanResult};

/// Producer of scan results.
pub trait Scanner {
    /// Performs one scan. `None` means nothing was recognised or the user
    /// backed out of the scan screen.
    fn scan(&mut self, mode: ScanMode) -> Option<ScanResult>;
}

/// Scanner that replays queued results in order, regardless of mode.
///
/// Stands in for the camera in the terminal driver and in tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedScanner {
    queue: VecDeque<ScanResult>,
}

impl ScriptedScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ScanResult) {
        self.queue.push_back(result);
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Scanner for ScriptedScanner {
    fn scan(&mut self, mode: ScanMode) -> Option<ScanResult> {
        let result = self.queue.pop_front();
        tracing::debug!(mode = ?mode, recognised = result.is_some(), "scripted scan");
        result
    }
}
