//! Scan result payloads exchanged with the scanner collaborator.
//!
//! A scanner reports what it recognised as a [`ScanResult`]. Results travel as
//! JSON so that out-of-process scanners can feed the tracker:
//!
//! ```json
//! { "name": "우유", "expiry_date": "2024-10-16" }
//! ```
//!
//! `expiry_date` may be omitted when only the product was recognised; the
//! date is then collected through the manual entry dialog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::{FoodError, Result};

/// Recognition mode requested from the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Read a product barcode.
    Barcode,

    /// Recognise the product and printed date from a camera frame.
    AutoRecognition,
}

impl ScanMode {
    /// Short label shown on the scan screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Barcode => "바코드",
            Self::AutoRecognition => "자동 인식",
        }
    }
}

/// A `(name, expiry date)` pair produced by a scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Recognised product name.
    pub name: String,

    /// Recognised expiry date, `None` if the date could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl ScanResult {
    pub fn new(name: impl Into<String>, expiry_date: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            expiry_date,
        }
    }

    /// Decodes a scanner message.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::Validation`] if the payload is not a valid result
    /// (bad JSON, missing name, or a date not in `YYYY-MM-DD` form).
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| FoodError::Validation(format!("malformed scan result: {e}")))
    }

    /// Encodes the result as a scanner message.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::Validation`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| FoodError::Validation(format!("failed to encode scan result: {e}")))
    }
}
