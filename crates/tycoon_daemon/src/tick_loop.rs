use crate::state::{AlertMessage, AlertTx, SharedSim};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tycoon_core::{classify_alert, EVENT_CATALOG};

/// Advance the simulation on a fixed wall-clock interval.
///
/// Paused or bankrupt games hold their state; the loop keeps running so a
/// resume or reset picks the cadence back up without respawning anything.
pub async fn run_tick_loop(sim: SharedSim, alert_tx: AlertTx, paused: Arc<AtomicBool>, tick_ms: u64) {
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        if paused.load(Ordering::Relaxed) {
            continue;
        }

        let fresh_alerts = {
            let mut guard = sim.lock();
            let state = &mut *guard;
            if state.business.is_bankrupt() {
                continue;
            }

            let previous_alerts = state.business.alerts.clone();
            state.business =
                tycoon_core::step(&state.business, EVENT_CATALOG, &state.config, &mut state.rng);
            state.push_profit_sample();

            if let Err(err) = tycoon_world::save_state(&state.save_path, &state.business) {
                if !state.save_warned {
                    tracing::warn!("autosave failed, will retry silently: {err:#}");
                    state.save_warned = true;
                }
            } else if state.save_warned {
                tracing::info!("autosave recovered");
                state.save_warned = false;
            }

            // Persistent conditions re-emit the same alert text each cycle;
            // only the newcomers go out on the stream.
            state
                .business
                .alerts
                .iter()
                .filter(|a| !previous_alerts.contains(a))
                .map(|a| AlertMessage {
                    kind: classify_alert(a),
                    text: a.clone(),
                })
                .collect::<Vec<_>>()
        };

        if !fresh_alerts.is_empty() {
            let _ = alert_tx.send(fresh_alerts);
        }
    }
}
