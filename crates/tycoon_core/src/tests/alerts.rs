use super::*;

#[test]
fn classification_by_marker_glyph() {
    assert_eq!(classify_alert("🚨 ALERT: reserves low"), AlertKind::Error);
    assert_eq!(classify_alert("💥 New event: strike"), AlertKind::Error);
    assert_eq!(classify_alert("⚠️ WARNING: interest"), AlertKind::Warning);
    assert_eq!(classify_alert("💡 TIP: missed sales"), AlertKind::Info);
    assert_eq!(classify_alert("✅ Event ended: boom"), AlertKind::Success);
    assert_eq!(classify_alert("🎉 New event: boom"), AlertKind::Success);
}

#[test]
fn classification_falls_back_to_info() {
    assert_eq!(classify_alert("Welcome to the factory"), AlertKind::Info);
    assert_eq!(classify_alert(""), AlertKind::Info);
}

#[test]
fn bankruptcy_keyword_classifies_as_error_regardless_of_glyph() {
    assert_eq!(classify_alert("BANKRUPT! Game over."), AlertKind::Error);
}

#[test]
fn bankruptcy_alert_fires_at_zero_cash() {
    let config = base_config();
    let mut state = base_state(&config);
    state.cash = 10.0;
    state.workers = 4;

    let next = step_no_events(&state, &config);
    assert!(next.is_bankrupt());
    assert!(next.alerts.iter().any(|a| a.contains("BANKRUPT")));
}

#[test]
fn low_reserves_warning_below_three_cycles_of_fixed_costs() {
    // Engineered so the cycle ends with cash=100 against fixedCosts=50.
    let config = base_config();
    let mut state = base_state(&config);
    state.cash = 150.0;
    state.price = config.max_price; // demand 0, no revenue
    state.marketing_budget = 15.0;

    let next = step_no_events(&state, &config);
    assert_eq!(next.fixed_costs, 50.0);
    assert_eq!(next.cash, 100.0);
    assert!(next
        .alerts
        .iter()
        .any(|a| a.contains("reserves are running very low")));
    assert!(!next.alerts.iter().any(|a| a.contains("BANKRUPT")));
}

#[test]
fn interest_above_profit_warns_with_the_charged_amount() {
    let config = base_config();
    let mut state = base_state(&config);
    state.cash = 100_000.0; // keep the reserves warning out of the way
    state.debt = 1000.0;
    state.price = config.max_price; // no revenue, profit is negative

    let next = step_no_events(&state, &config);
    assert!(next
        .alerts
        .iter()
        .any(|a| a.contains("Debt interest") && a.contains("$50")));
}

#[test]
fn missed_sales_tip_reports_the_unmet_demand() {
    let config = base_config();
    let mut state = base_state(&config);
    state.cash = 100_000.0;

    let next = step_no_events(&state, &config);
    assert_eq!(next.unmet_demand, 32);
    assert!(next.alerts.iter().any(|a| a.contains("missed 32 sales")));
}

#[test]
fn under_utilization_warns_when_capacity_sits_idle() {
    let config = base_config();
    let mut state = base_state(&config);
    state.cash = 100_000.0;
    state.workers = 5;
    state.assembly_lines = 5;
    state.price = config.max_price; // demand 0 against capacity 50

    let next = step_no_events(&state, &config);
    assert_eq!(next.utilization_rate, 0.0);
    assert!(next.alerts.iter().any(|a| a.contains("under-utilized")));
}

#[test]
fn alert_list_is_replaced_not_accumulated() {
    let config = base_config();
    let mut state = base_state(&config);
    state.cash = 100_000.0;

    let first = step_no_events(&state, &config);
    let second = step_no_events(&first, &config);
    // Same conditions hold on both cycles: identical list, not a doubled one.
    assert_eq!(first.alerts, second.alerts);

    // Fix the bottleneck; the tip must disappear entirely.
    let mut fixed = second.clone();
    fixed.workers = 10;
    fixed.assembly_lines = 10;
    let third = step_no_events(&fixed, &config);
    assert!(!third.alerts.iter().any(|a| a.contains("missed")));
}
