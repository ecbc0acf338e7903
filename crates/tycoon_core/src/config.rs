//! Tunable economic parameters.
//!
//! Defaults reproduce the balance the game ships with; drivers may override
//! them from a JSON file (see `tycoon_world::load_config`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    // Demand model.
    pub base_demand: f64,
    /// Price at which the price-sensitivity factor peaks.
    pub ideal_price: f64,
    /// Quadratic falloff coefficient above the ideal price.
    pub overprice_penalty: f64,
    /// Quadratic falloff coefficient below the ideal price.
    pub underprice_penalty: f64,
    /// Marketing factor is `1 + sqrt(budget) / divisor`.
    pub marketing_sqrt_divisor: f64,

    // Production.
    pub output_per_worker_per_line: f64,
    /// How many workers a single assembly line can keep busy.
    pub workers_per_line: u32,
    pub raw_material_cost: f64,

    // Recurring and one-time costs.
    pub worker_salary: f64,
    pub worker_hire_cost: f64,
    pub line_cost: f64,
    /// Fraction of `line_cost` recovered when selling a line.
    pub line_resale_factor: f64,
    /// Per-cycle electricity and maintenance per line.
    pub line_upkeep: f64,

    // Investment and debt.
    pub interest_rate: f64,
    /// Dollars of dividends per point of investor confidence.
    pub dividend_confidence_ratio: f64,
    /// Credit unlocked per point of investor confidence.
    pub credit_multiplier: f64,

    // Player input bounds.
    pub min_price: f64,
    pub max_price: f64,
    pub max_marketing_budget: f64,

    // Event scheduling (scheduled-cooldown policy).
    pub event_min_cooldown: u64,
    /// Width of the uniform-random window added to the cooldown.
    pub event_window: u64,

    // Starting position.
    pub starting_cash: f64,
    pub starting_price: f64,
    pub starting_workers: u32,
    pub starting_lines: u32,

    // Alert thresholds.
    /// Low-reserves warning fires below `fixed_costs × multiplier`.
    pub low_reserves_multiplier: f64,
    pub unmet_demand_tip_threshold: u32,
    /// Under-utilization warning fires below this percentage.
    pub low_utilization_pct: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_demand: 50.0,
            ideal_price: 12.0,
            overprice_penalty: 2.5,
            underprice_penalty: 0.5,
            marketing_sqrt_divisor: 15.0,
            output_per_worker_per_line: 10.0,
            workers_per_line: 1,
            raw_material_cost: 4.0,
            worker_salary: 20.0,
            worker_hire_cost: 250.0,
            line_cost: 800.0,
            line_resale_factor: 0.5,
            line_upkeep: 15.0,
            interest_rate: 0.05,
            dividend_confidence_ratio: 1000.0,
            credit_multiplier: 5000.0,
            min_price: 1.0,
            max_price: 50.0,
            max_marketing_budget: 500.0,
            event_min_cooldown: 40,
            event_window: 30,
            starting_cash: 1000.0,
            starting_price: 15.0,
            starting_workers: 1,
            starting_lines: 1,
            low_reserves_multiplier: 3.0,
            unmet_demand_tip_threshold: 10,
            low_utilization_pct: 50.0,
        }
    }
}
