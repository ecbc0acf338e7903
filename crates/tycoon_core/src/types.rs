//! Type definitions for `tycoon_core`.
//!
//! The business snapshot, event templates and live event occurrences.

use serde::{Deserialize, Serialize};

use crate::EconomyConfig;

/// Whether an event helps or hurts the player while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Beneficial,
    Harmful,
}

/// The single economic parameter an event perturbs, with its multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parameter", content = "factor")]
pub enum EventEffect {
    RawMaterialCost(f64),
    BaseDemand(f64),
    WorkerSalary(f64),
    OutputPerWorker(f64),
}

/// An immutable catalog entry. Instantiated into an [`ActiveEvent`] on trigger.
#[derive(Debug, Clone, Copy)]
pub struct EventTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: EventKind,
    /// Total duration in cycles, always > 0.
    pub duration_cycles: u64,
    pub effect: EventEffect,
}

impl EventTemplate {
    /// Create a live occurrence with the full duration remaining.
    pub fn instantiate(&self) -> ActiveEvent {
        ActiveEvent {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            duration_cycles: self.duration_cycles,
            duration_remaining: self.duration_cycles,
            effect: self.effect,
        }
    }
}

/// A triggered event currently perturbing the economy. At most one is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    pub duration_cycles: u64,
    /// Decremented once per cycle; the event is removed when it reaches 0.
    pub duration_remaining: u64,
    pub effect: EventEffect,
}

/// Full snapshot of the business, owned by the driver and passed by reference
/// into [`crate::step`] each cycle. Serialized flat as the single save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessState {
    pub cycle: u64,
    /// Reaching ≤ 0 signals terminal bankruptcy (handled by the driver).
    pub cash: f64,
    pub price: f64,
    /// Spent every cycle regardless of sales.
    pub marketing_budget: f64,
    pub workers: u32,
    pub assembly_lines: u32,
    /// Cumulative. Acts as the player's score.
    pub dividends_paid: f64,
    /// Gates the maximum borrowable debt; grows only via dividends.
    pub investor_confidence: u32,
    pub debt: f64,

    // Derived each cycle but persisted with the snapshot.
    pub production_capacity: u32,
    pub demand: u32,
    pub units_sold: u32,
    pub revenue: f64,
    pub variable_costs: f64,
    pub fixed_costs: f64,
    pub profit_per_cycle: f64,
    /// Percentage in [0, 100]; 0 when capacity is 0.
    pub utilization_rate: f64,
    pub unmet_demand: u32,

    /// Replaced wholesale each cycle, never accumulated.
    pub alerts: Vec<String>,
    pub active_event: Option<ActiveEvent>,
    /// Cycle at which the next event fires. None while an event is active.
    pub next_event_cycle: Option<u64>,
}

impl BusinessState {
    /// Fresh state from the configured starting values. Derived fields are
    /// zero until the first step; no event is scheduled yet (drivers arm the
    /// first trigger with their RNG).
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            cycle: 0,
            cash: config.starting_cash,
            price: config.starting_price,
            marketing_budget: 0.0,
            workers: config.starting_workers,
            assembly_lines: config.starting_lines,
            dividends_paid: 0.0,
            investor_confidence: 0,
            debt: 0.0,
            production_capacity: 0,
            demand: 0,
            units_sold: 0,
            revenue: 0.0,
            variable_costs: 0.0,
            fixed_costs: 0.0,
            profit_per_cycle: 0.0,
            utilization_rate: 0.0,
            unmet_demand: 0,
            alerts: Vec::new(),
            active_event: None,
            next_event_cycle: None,
        }
    }

    /// Terminal game state. The engine keeps producing valid states past this
    /// point; drivers are responsible for freezing further cycles.
    pub fn is_bankrupt(&self) -> bool {
        self.cash <= 0.0
    }

    /// Remaining credit under the investor-confidence credit line.
    pub fn available_credit(&self, config: &EconomyConfig) -> f64 {
        (f64::from(self.investor_confidence) * config.credit_multiplier - self.debt).max(0.0)
    }
}
