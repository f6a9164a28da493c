//! Result aggregation: one summary row per product.

use std::collections::HashMap;

use crate::domain::correlation::PriceUnitsCorrelation;
use crate::domain::demand::DemandModel;
use crate::domain::strategy::StrategyResult;

/// Outer join of model, correlation, and best strategy for one product.
/// Missing joins stay `None`; the model set drives membership and order.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub product_id: String,
    pub category: String,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub optimal_price: f64,
    pub optimal_revenue: f64,
    pub correlation: Option<f64>,
    pub best_strategy: Option<String>,
    pub best_new_price: Option<f64>,
    pub best_expected_units: Option<f64>,
    pub best_expected_revenue: Option<f64>,
}

/// Left-preserving join on (product_id, category), keyed by the model set
/// and in model order. Purely structural; nothing is recomputed.
pub fn aggregate(
    models: &[DemandModel],
    correlations: &[PriceUnitsCorrelation],
    best_strategies: &[StrategyResult],
) -> Vec<SummaryRow> {
    let corr_by_product: HashMap<&str, f64> = correlations
        .iter()
        .map(|c| (c.product_id.as_str(), c.correlation))
        .collect();

    let strategy_by_product: HashMap<(&str, &str), &StrategyResult> = best_strategies
        .iter()
        .map(|s| ((s.product_id.as_str(), s.category.as_str()), s))
        .collect();

    models
        .iter()
        .map(|m| {
            let best = strategy_by_product
                .get(&(m.product_id.as_str(), m.category.as_str()))
                .copied();
            SummaryRow {
                product_id: m.product_id.clone(),
                category: m.category.clone(),
                a: m.a,
                b: m.b,
                optimal_price: m.optimal_price,
                optimal_revenue: m.optimal_revenue,
                correlation: corr_by_product.get(m.product_id.as_str()).copied(),
                best_strategy: best.map(|s| s.strategy_label.clone()),
                best_new_price: best.map(|s| s.new_price),
                best_expected_units: best.map(|s| s.expected_units),
                best_expected_revenue: best.map(|s| s.expected_revenue),
            }
        })
        .collect()
}
