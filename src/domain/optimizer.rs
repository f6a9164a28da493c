//! Revenue-maximizing price under clamp bounds.
//!
//! Revenue under the linear model is the parabola R(p) = p * (a + b*p); for
//! b < 0 its vertex -a/(2b) is the unconstrained optimum. The optimum is
//! clamped into [lower_factor * min observed price, upper_factor * max
//! observed price] to keep the model from extrapolating far outside the
//! prices it was fitted on.

use crate::domain::demand::DemandFit;
use crate::domain::error::PricelabError;
use crate::domain::observation::{round_cents, ProductSeries};

/// Admissible price window for optimization and curve simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub low: f64,
    pub high: f64,
    /// True when the observed bounds were malformed (min price not strictly
    /// positive) and the window fell back to the literal observed prices
    /// instead of the factored ones. A diagnostic, not an error.
    pub fallback: bool,
}

impl PriceBounds {
    /// Clamp window from the observed price range of a series.
    pub fn from_series(series: &ProductSeries, lower_factor: f64, upper_factor: f64) -> Self {
        let p_min = series.min_price();
        let p_max = series.max_price();

        if p_min > 0.0 {
            PriceBounds {
                low: p_min * lower_factor,
                high: p_max * upper_factor,
                fallback: false,
            }
        } else {
            PriceBounds {
                low: p_min,
                high: p_max,
                fallback: true,
            }
        }
    }
}

/// Optimizer output for one product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalPrice {
    pub price: f64,
    pub units: f64,
    pub revenue: f64,
}

/// Find the revenue-maximizing price within the clamp window.
///
/// A flat fit, or a linear fit with exactly zero slope, gives a revenue
/// function that is monotone in price over the window, so only the window
/// endpoints are candidates; an exact revenue tie prefers the lower price.
pub fn optimize(
    series: &ProductSeries,
    fit: &DemandFit,
    bounds: &PriceBounds,
) -> Result<OptimalPrice, PricelabError> {
    if series.is_empty() {
        return Err(PricelabError::UnfittableModel {
            product_id: series.product_id().to_string(),
        });
    }

    match *fit {
        DemandFit::Linear { a, b } if b != 0.0 => {
            let vertex = -a / (2.0 * b);
            let price = round_cents(vertex.clamp(bounds.low, bounds.high));
            let units = fit.predict_units(price);
            Ok(OptimalPrice {
                price,
                units,
                revenue: round_cents(price * units),
            })
        }
        _ => {
            let low_rev = bounds.low * fit.predict_units(bounds.low);
            let high_rev = bounds.high * fit.predict_units(bounds.high);
            let price = if low_rev >= high_rev {
                bounds.low
            } else {
                bounds.high
            };
            let price = round_cents(price);
            let units = fit.predict_units(price);
            Ok(OptimalPrice {
                price,
                units,
                revenue: round_cents(price * units),
            })
        }
    }
}
