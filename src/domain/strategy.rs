//! Discrete pricing strategy simulation.
//!
//! Each strategy is a percentage change applied to the historical average
//! price. Strategies are evaluated independently against the fitted model
//! (or its flat fallback) and ranked by expected revenue.

use crate::domain::demand::DemandFit;
use crate::domain::error::PricelabError;
use crate::domain::observation::{round_cents, ProductSeries};

/// Expected outcome of one (product, strategy) pair.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub product_id: String,
    pub category: String,
    pub strategy_label: String,
    pub new_price: f64,
    pub expected_units: f64,
    pub expected_revenue: f64,
}

/// "-10%", "0%", "10%".
pub fn strategy_label(pct_change: f64) -> String {
    format!("{}%", (pct_change * 100.0).round() as i64)
}

/// Evaluate every configured percentage change for one product, in the
/// configured order.
pub fn simulate_strategies(
    series: &ProductSeries,
    fit: &DemandFit,
    pct_changes: &[f64],
) -> Result<Vec<StrategyResult>, PricelabError> {
    if series.is_empty() {
        return Err(PricelabError::InvalidInput {
            product_id: series.product_id().to_string(),
            reason: "cannot compute mean price of an empty series".into(),
        });
    }

    let mean_price = series.mean_price();
    let results = pct_changes
        .iter()
        .map(|&pct| {
            let new_price = round_cents(mean_price * (1.0 + pct));
            let expected_units = fit.predict_units(new_price);
            StrategyResult {
                product_id: series.product_id().to_string(),
                category: series.category().to_string(),
                strategy_label: strategy_label(pct),
                new_price,
                expected_units: round_cents(expected_units),
                expected_revenue: round_cents(new_price * expected_units),
            }
        })
        .collect();

    Ok(results)
}

/// The strategy with the highest expected revenue; an exact tie keeps the
/// one listed first in the configured set.
pub fn best_strategy(results: &[StrategyResult]) -> Option<&StrategyResult> {
    results.iter().reduce(|best, candidate| {
        if candidate.expected_revenue > best.expected_revenue {
            candidate
        } else {
            best
        }
    })
}
