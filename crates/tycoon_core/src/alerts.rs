//! Alert message classification.
//!
//! Alerts travel as plain strings in the state snapshot; drivers decide how to
//! surface each one (transient notification vs. rotating banner) based on the
//! classification below.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Error,
    Warning,
    Info,
    Success,
}

/// Classify a message by its leading marker glyph or keyword.
/// Unclassifiable messages fall back to `Info`.
pub fn classify_alert(message: &str) -> AlertKind {
    if message.contains("BANKRUPT") || message.starts_with('🚨') || message.starts_with('💥') {
        AlertKind::Error
    } else if message.starts_with("⚠️") {
        AlertKind::Warning
    } else if message.starts_with('💡') {
        AlertKind::Info
    } else if message.starts_with('✅') || message.starts_with('🎉') {
        AlertKind::Success
    } else {
        AlertKind::Info
    }
}
