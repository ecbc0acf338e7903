use parking_lot::Mutex;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::broadcast;
use tycoon_core::{AlertKind, BusinessState, EconomyConfig};

/// Profit samples kept for the history endpoint.
pub const MAX_PROFIT_HISTORY: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct ProfitSample {
    pub cycle: u64,
    pub profit: f64,
    pub cash: f64,
}

/// An alert paired with its severity, as pushed over the SSE stream.
#[derive(Debug, Clone, Serialize)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub text: String,
}

pub struct SimState {
    pub business: BusinessState,
    pub config: EconomyConfig,
    pub rng: ChaCha8Rng,
    pub profit_history: VecDeque<ProfitSample>,
    pub save_path: PathBuf,
    /// Set after the first failed autosave so the log is not flooded.
    pub save_warned: bool,
}

impl SimState {
    pub fn push_profit_sample(&mut self) {
        if self.profit_history.len() == MAX_PROFIT_HISTORY {
            self.profit_history.pop_front();
        }
        self.profit_history.push_back(ProfitSample {
            cycle: self.business.cycle,
            profit: self.business.profit_per_cycle,
            cash: self.business.cash,
        });
    }
}

pub type SharedSim = Arc<Mutex<SimState>>;
pub type AlertTx = broadcast::Sender<Vec<AlertMessage>>;

#[derive(Clone)]
pub struct AppState {
    pub sim: SharedSim,
    pub alert_tx: AlertTx,
    pub paused: Arc<AtomicBool>,
    pub tick_ms: u64,
}
