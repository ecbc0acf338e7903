//! Validated player actions.
//!
//! Each action is a direct, synchronous state transition outside the stepped
//! simulation: a simple linear balance transfer checked against affordability.
//! A failed precondition is a typed rejection and leaves the state untouched —
//! never a panic, never a partial apply.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tycoon_core::{BusinessState, EconomyConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetPrice { price: f64 },
    SetMarketingBudget { budget: f64 },
    HireWorker,
    FireWorker,
    BuyAssemblyLine,
    SellAssemblyLine,
    PayDividend { amount: f64 },
    Borrow { amount: f64 },
    Repay { amount: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("price must be within the configured range")]
    PriceOutOfRange,
    #[error("marketing budget must be within the configured range")]
    MarketingOutOfRange,
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("not enough cash")]
    InsufficientCash,
    #[error("no workers to let go")]
    NoWorkers,
    #[error("no assembly lines to sell")]
    NoAssemblyLines,
    #[error("amount exceeds the available credit line")]
    CreditLineExceeded,
    #[error("amount exceeds the outstanding debt")]
    ExceedsDebt,
}

/// Apply a player action to the state, or reject it without side effects.
pub fn apply_action(
    state: &mut BusinessState,
    config: &EconomyConfig,
    action: &Action,
) -> Result<(), ActionError> {
    match *action {
        Action::SetPrice { price } => {
            if !(config.min_price..=config.max_price).contains(&price) {
                return Err(ActionError::PriceOutOfRange);
            }
            state.price = price;
        }
        Action::SetMarketingBudget { budget } => {
            if !(0.0..=config.max_marketing_budget).contains(&budget) {
                return Err(ActionError::MarketingOutOfRange);
            }
            state.marketing_budget = budget;
        }
        Action::HireWorker => {
            if state.cash < config.worker_hire_cost {
                return Err(ActionError::InsufficientCash);
            }
            state.workers += 1;
            state.cash -= config.worker_hire_cost;
        }
        Action::FireWorker => {
            if state.workers == 0 {
                return Err(ActionError::NoWorkers);
            }
            // No severance: letting someone go costs nothing up front.
            state.workers -= 1;
        }
        Action::BuyAssemblyLine => {
            if state.cash < config.line_cost {
                return Err(ActionError::InsufficientCash);
            }
            state.assembly_lines += 1;
            state.cash -= config.line_cost;
        }
        Action::SellAssemblyLine => {
            if state.assembly_lines == 0 {
                return Err(ActionError::NoAssemblyLines);
            }
            state.assembly_lines -= 1;
            state.cash += config.line_cost * config.line_resale_factor;
        }
        Action::PayDividend { amount } => {
            if amount <= 0.0 {
                return Err(ActionError::NonPositiveAmount);
            }
            if state.cash < amount {
                return Err(ActionError::InsufficientCash);
            }
            state.cash -= amount;
            state.dividends_paid += amount;
            state.investor_confidence += confidence_gained(amount, config);
        }
        Action::Borrow { amount } => {
            if amount <= 0.0 {
                return Err(ActionError::NonPositiveAmount);
            }
            if amount > state.available_credit(config) {
                return Err(ActionError::CreditLineExceeded);
            }
            state.cash += amount;
            state.debt += amount;
        }
        Action::Repay { amount } => {
            if amount <= 0.0 {
                return Err(ActionError::NonPositiveAmount);
            }
            if amount > state.debt {
                return Err(ActionError::ExceedsDebt);
            }
            if amount > state.cash {
                return Err(ActionError::InsufficientCash);
            }
            state.cash -= amount;
            state.debt -= amount;
        }
    }
    Ok(())
}

/// Confidence points earned by a dividend payment.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence_gained(amount: f64, config: &EconomyConfig) -> u32 {
    (amount / config.dividend_confidence_ratio)
        .floor()
        .clamp(0.0, f64::from(u32::MAX)) as u32
}
