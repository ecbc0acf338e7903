//! Startup state and the on-disk save slot, shared by tycoon_cli and
//! tycoon_daemon.

use anyhow::{bail, Context, Result};
use rand::Rng;
use std::path::Path;
use tycoon_core::{BusinessState, EconomyConfig};

/// Fresh game with the welcome alert and the first event trigger armed.
pub fn initial_state(config: &EconomyConfig, rng: &mut impl Rng) -> BusinessState {
    let mut state = BusinessState::new(config);
    state.alerts.push(
        "Welcome to Paperclip Tycoon! Hire workers and buy assembly lines to start production."
            .to_string(),
    );
    state.next_event_cycle =
        Some(config.event_min_cooldown + rng.gen_range(0..config.event_window));
    state
}

/// Load economy overrides from a JSON file. A missing file means defaults;
/// a present-but-broken file is a hard error rather than a silent reset.
pub fn load_config(path: &Path) -> Result<EconomyConfig> {
    if !path.exists() {
        return Ok(EconomyConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn save_state(path: &Path, state: &BusinessState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("serializing state")?;
    std::fs::write(path, json).with_context(|| format!("writing save {}", path.display()))?;
    Ok(())
}

/// Load a save slot, rejecting anything that does not carry a numeric `cash`
/// and `cycle`. The shape check runs on the raw JSON first so the error names
/// the save as corrupt rather than surfacing a field-by-field serde trail.
pub fn load_state(path: &Path) -> Result<BusinessState> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("reading save {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing save {}", path.display()))?;
    if !value.get("cash").is_some_and(serde_json::Value::is_number)
        || !value.get("cycle").is_some_and(serde_json::Value::is_number)
    {
        bail!("save {} is corrupt: cash and cycle must be numbers", path.display());
    }
    serde_json::from_value(value).with_context(|| format!("decoding save {}", path.display()))
}

/// Resume from the save slot if it holds a valid snapshot, otherwise start a
/// new game. A corrupt or missing save is never fatal at startup.
pub fn load_or_default(
    path: &Path,
    config: &EconomyConfig,
    rng: &mut impl Rng,
) -> BusinessState {
    match load_state(path) {
        Ok(state) => state,
        Err(_) => initial_state(config, rng),
    }
}
