//! `tycoon_core` — deterministic per-cycle business simulation.
//!
//! No IO, no network. All randomness via the passed-in Rng.

mod alerts;
mod catalog;
mod config;
mod engine;
mod types;

pub use alerts::{classify_alert, AlertKind};
pub use catalog::EVENT_CATALOG;
pub use config::EconomyConfig;
pub use engine::step;
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

#[cfg(test)]
mod tests;
