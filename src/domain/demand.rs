//! Linear demand model fitting (ordinary least squares, closed form).
//!
//! units_sold ≈ a + b * price, with b = cov(price, units) / var(price) and
//! a = mean(units) - b * mean(price). A series whose price sample has zero
//! variance (all prices identical, or a single observation) cannot pin down
//! a slope; the fit degrades to a flat prediction at the sample mean of
//! units sold instead of failing.

use crate::domain::observation::ProductSeries;

/// Fitted demand relationship for one product, consumed exhaustively by
/// every downstream stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemandFit {
    /// Well-defined least-squares line.
    Linear { a: f64, b: f64 },
    /// Zero price variance; predictions fall back to the mean of units sold.
    Flat { mean_units: f64 },
}

impl DemandFit {
    /// Predicted units sold at the given price, floored at zero.
    pub fn predict_units(&self, price: f64) -> f64 {
        let q = match *self {
            DemandFit::Linear { a, b } => a + b * price,
            DemandFit::Flat { mean_units } => mean_units,
        };
        q.max(0.0)
    }

    /// Intercept and slope when the fit is linear.
    pub fn coefficients(&self) -> Option<(f64, f64)> {
        match *self {
            DemandFit::Linear { a, b } => Some((a, b)),
            DemandFit::Flat { .. } => None,
        }
    }
}

/// Fit the demand line for one product. Pure function of the series; the
/// series invariants (non-empty, non-negative values) are guaranteed by
/// [`ProductSeries`] construction.
pub fn fit_demand(series: &ProductSeries) -> DemandFit {
    let var_p = series.price_variance();
    if var_p <= 0.0 || !var_p.is_finite() {
        return DemandFit::Flat {
            mean_units: series.mean_units(),
        };
    }

    let b = series.price_units_covariance() / var_p;
    let a = series.mean_units() - b * series.mean_price();
    DemandFit::Linear { a, b }
}

/// Per-product model summary row: coefficients (absent for a flat fit) plus
/// the optimizer's clamped optimum.
#[derive(Debug, Clone)]
pub struct DemandModel {
    pub product_id: String,
    pub category: String,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub optimal_price: f64,
    pub optimal_revenue: f64,
}
