use rand::Rng;

use crate::{
    ActiveEvent, BusinessState, EconomyConfig, EventEffect, EventKind, EventTemplate,
};

/// Advance the simulation by one cycle.
///
/// Order of operations:
/// 1. Advance the cycle counter.
/// 2. Event lifecycle: tick down the active event or trigger a new one.
/// 3. Resolve effective parameters (active event's multiplier applied).
/// 4. Demand, capacity, sales.
/// 5. Revenue, costs, profit, cash.
/// 6. Utilization and condition alerts.
///
/// Never mutates its input and never fails: all quantities are clamped to
/// their valid ranges by construction. Randomness enters only through `rng`,
/// and only for event selection and next-trigger scheduling — given the same
/// input state, every other field of the result is deterministic.
pub fn step(
    prev: &BusinessState,
    catalog: &[EventTemplate],
    config: &EconomyConfig,
    rng: &mut impl Rng,
) -> BusinessState {
    let mut state = prev.clone();
    state.cycle += 1;

    let mut alerts = Vec::new();
    advance_event_lifecycle(&mut state, catalog, config, rng, &mut alerts);

    let eff = effective_params(state.active_event.as_ref(), config);

    // Demand: price sensitivity peaks at the ideal price and falls off
    // quadratically, steeper above the ideal than below; marketing grows
    // demand sub-linearly with spend.
    let price_ratio = state.price / config.ideal_price;
    let penalty = if price_ratio > 1.0 {
        config.overprice_penalty
    } else {
        config.underprice_penalty
    };
    let price_factor = (1.0 - (price_ratio - 1.0).powi(2) * penalty).max(0.0);
    let marketing_factor = 1.0 + state.marketing_budget.sqrt() / config.marketing_sqrt_divisor;
    state.demand = floor_units(eff.base_demand * price_factor * marketing_factor);

    // Capacity: workers beyond the available line slots produce nothing.
    let staffed_workers = state
        .workers
        .min(state.assembly_lines.saturating_mul(config.workers_per_line));
    state.production_capacity = floor_units(f64::from(staffed_workers) * eff.output_per_worker);

    state.units_sold = state.demand.min(state.production_capacity);
    state.unmet_demand = state.demand.saturating_sub(state.production_capacity);

    state.revenue = f64::from(state.units_sold) * state.price;
    state.variable_costs = f64::from(state.units_sold) * eff.raw_material_cost;

    let salary_costs = f64::from(state.workers) * eff.worker_salary;
    let upkeep_costs = f64::from(state.assembly_lines) * config.line_upkeep;
    let interest_cost = (state.debt * config.interest_rate).floor();
    state.fixed_costs = salary_costs + upkeep_costs + state.marketing_budget + interest_cost;

    state.profit_per_cycle = state.revenue - state.variable_costs - state.fixed_costs;
    state.cash += state.profit_per_cycle;

    state.utilization_rate = if state.production_capacity > 0 {
        f64::from(state.units_sold) / f64::from(state.production_capacity) * 100.0
    } else {
        0.0
    };

    push_condition_alerts(&state, interest_cost, config, &mut alerts);
    state.alerts = alerts;
    state
}

/// Global parameters after applying the active event's single multiplier.
struct EffectiveParams {
    base_demand: f64,
    output_per_worker: f64,
    raw_material_cost: f64,
    worker_salary: f64,
}

fn effective_params(event: Option<&ActiveEvent>, config: &EconomyConfig) -> EffectiveParams {
    let mut params = EffectiveParams {
        base_demand: config.base_demand,
        output_per_worker: config.output_per_worker_per_line,
        raw_material_cost: config.raw_material_cost,
        worker_salary: config.worker_salary,
    };
    if let Some(event) = event {
        match event.effect {
            EventEffect::RawMaterialCost(factor) => params.raw_material_cost *= factor,
            EventEffect::BaseDemand(factor) => params.base_demand *= factor,
            EventEffect::WorkerSalary(factor) => params.worker_salary *= factor,
            EventEffect::OutputPerWorker(factor) => params.output_per_worker *= factor,
        }
    }
    params
}

/// Scheduled-cooldown trigger policy: while no event is live,
/// `next_event_cycle` holds the cycle at which the next one fires; it is
/// re-armed `min_cooldown + uniform(0, window)` cycles after an event ends.
///
/// An ending event is removed *before* parameter resolution, so its
/// multiplier no longer applies on the cycle its remaining duration hits 0.
fn advance_event_lifecycle(
    state: &mut BusinessState,
    catalog: &[EventTemplate],
    config: &EconomyConfig,
    rng: &mut impl Rng,
    alerts: &mut Vec<String>,
) {
    if let Some(mut event) = state.active_event.take() {
        event.duration_remaining -= 1;
        if event.duration_remaining == 0 {
            alerts.push(format!("✅ Event ended: {}", event.title));
            state.next_event_cycle =
                Some(state.cycle + config.event_min_cooldown + rng.gen_range(0..config.event_window));
        } else {
            state.active_event = Some(event);
        }
    } else if state.next_event_cycle.is_some_and(|at| state.cycle >= at) && !catalog.is_empty() {
        let template = &catalog[rng.gen_range(0..catalog.len())];
        let event = template.instantiate();
        let icon = match event.kind {
            EventKind::Beneficial => '🎉',
            EventKind::Harmful => '💥',
        };
        alerts.push(format!("{icon} New event: {}", event.title));
        state.active_event = Some(event);
        state.next_event_cycle = None;
    }
}

fn push_condition_alerts(
    state: &BusinessState,
    interest_cost: f64,
    config: &EconomyConfig,
    alerts: &mut Vec<String>,
) {
    if state.cash <= 0.0 {
        alerts.push("🚨 BANKRUPT! Your cash reserves are gone. Game over.".to_string());
    } else if state.cash < state.fixed_costs * config.low_reserves_multiplier {
        alerts.push("🚨 ALERT: Cash reserves are running very low!".to_string());
    }

    if interest_cost > 0.0 && state.profit_per_cycle < interest_cost {
        alerts.push(format!(
            "⚠️ WARNING: Debt interest (${interest_cost:.0}) exceeds your profit this cycle!"
        ));
    }

    if state.unmet_demand > config.unmet_demand_tip_threshold {
        alerts.push(format!(
            "💡 TIP: You missed {} sales! Consider expanding production.",
            state.unmet_demand
        ));
    }

    if state.utilization_rate < config.low_utilization_pct
        && f64::from(state.production_capacity) > config.base_demand / 2.0
    {
        alerts.push(
            "⚠️ WARNING: Production capacity is under-utilized. Lower the price or increase marketing."
                .to_string(),
        );
    }
}

/// Floor to whole units, clamped to the u32 range (demand and capacity are
/// never negative).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_units(value: f64) -> u32 {
    value.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}
