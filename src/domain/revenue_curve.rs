//! Revenue curve simulation over a dense price grid.

use crate::domain::demand::DemandFit;
use crate::domain::observation::round_cents;
use crate::domain::optimizer::PriceBounds;

/// One simulated point on a product's revenue curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueCurvePoint {
    pub product_id: String,
    pub category: String,
    pub price: f64,
    pub predicted_units: f64,
    pub predicted_revenue: f64,
}

/// Lazy iterator over evenly spaced prices spanning the clamp window, both
/// endpoints inclusive. Cloning restarts the sequence; two walks over the
/// same inputs produce identical points.
#[derive(Debug, Clone)]
pub struct RevenueCurve {
    product_id: String,
    category: String,
    fit: DemandFit,
    low: f64,
    step: f64,
    grid_points: usize,
    next_index: usize,
}

impl RevenueCurve {
    pub fn new(
        product_id: impl Into<String>,
        category: impl Into<String>,
        fit: DemandFit,
        bounds: PriceBounds,
        grid_points: usize,
    ) -> Self {
        let step = if grid_points > 1 {
            (bounds.high - bounds.low) / (grid_points - 1) as f64
        } else {
            0.0
        };
        Self {
            product_id: product_id.into(),
            category: category.into(),
            fit,
            low: bounds.low,
            step,
            grid_points,
            next_index: 0,
        }
    }
}

impl Iterator for RevenueCurve {
    type Item = RevenueCurvePoint;

    fn next(&mut self) -> Option<RevenueCurvePoint> {
        if self.next_index >= self.grid_points {
            return None;
        }
        let price = round_cents(self.low + self.next_index as f64 * self.step);
        self.next_index += 1;

        let predicted_units = self.fit.predict_units(price);
        Some(RevenueCurvePoint {
            product_id: self.product_id.clone(),
            category: self.category.clone(),
            price,
            predicted_units,
            predicted_revenue: round_cents(price * predicted_units),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid_points - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RevenueCurve {}
