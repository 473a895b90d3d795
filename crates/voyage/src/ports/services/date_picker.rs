//! Date Picker Port
//!
//! Platform date pickers differ (inline auto-dismiss vs. modal); the host
//! hides that behind this single call.

use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Result of a picker interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePickerResult {
    Picked(NaiveDateTime),
    Cancelled,
}

/// Capability to ask the user for a date
#[async_trait]
pub trait DatePickerHost: Send + Sync {
    /// Show a picker preset to `initial` that refuses dates before `min`
    async fn pick_date(&self, initial: NaiveDateTime, min: NaiveDateTime) -> DatePickerResult;
}
