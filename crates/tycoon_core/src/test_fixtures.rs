//! Shared test fixtures for tycoon_core and downstream crates.
//!
//! `base_config()` is the stock economy; `base_state()` is the starting
//! position with the first event trigger pushed far out so engine tests stay
//! deterministic unless they arm it explicitly.

use crate::{BusinessState, EconomyConfig, EventEffect, EventKind, EventTemplate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn base_config() -> EconomyConfig {
    EconomyConfig::default()
}

/// Starting state with no event scheduled. Tests that exercise the event
/// lifecycle set `next_event_cycle` (or `active_event`) themselves.
pub fn base_state(config: &EconomyConfig) -> BusinessState {
    BusinessState::new(config)
}

/// A single-entry catalog so a triggered event is predictable.
pub fn recession_only_catalog() -> &'static [EventTemplate] {
    const CATALOG: &[EventTemplate] = &[EventTemplate {
        id: "recession",
        title: "Economic recession",
        description: "Market demand has dropped by 40%.",
        kind: EventKind::Harmful,
        duration_cycles: 3,
        effect: EventEffect::BaseDemand(0.6),
    }];
    CATALOG
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
