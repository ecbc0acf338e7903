// Accounting identities are exact by construction, so tests compare floats
// directly.
#![allow(clippy::float_cmp)]

use super::*;
use crate::test_fixtures::{base_config, base_state, make_rng, recession_only_catalog};

mod alerts;

// --- Shared test helpers ------------------------------------------------

/// Step with an empty catalog: no event can trigger, so the result is fully
/// deterministic regardless of the RNG.
fn step_no_events(state: &BusinessState, config: &EconomyConfig) -> BusinessState {
    let mut rng = make_rng();
    step(state, &[], config, &mut rng)
}

/// State with a live event, as if it triggered `elapsed` cycles ago.
fn state_with_event(
    config: &EconomyConfig,
    template: &EventTemplate,
    elapsed: u64,
) -> BusinessState {
    let mut state = base_state(config);
    let mut event = template.instantiate();
    event.duration_remaining = event.duration_cycles - elapsed;
    state.active_event = Some(event);
    state
}
