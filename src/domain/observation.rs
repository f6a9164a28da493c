//! Weekly price/demand observations and per-product series.

use crate::domain::error::PricelabError;

/// One weekly (price, units sold) sample for a product. Immutable once
/// ingested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub price: f64,
    pub units_sold: f64,
}

/// Ordered observation series for one product, validated at construction:
/// non-empty, prices and units finite and non-negative.
#[derive(Debug, Clone)]
pub struct ProductSeries {
    product_id: String,
    category: String,
    observations: Vec<Observation>,
}

impl ProductSeries {
    pub fn new(
        product_id: impl Into<String>,
        category: impl Into<String>,
        observations: Vec<Observation>,
    ) -> Result<Self, PricelabError> {
        let product_id = product_id.into();
        let category = category.into();

        if observations.is_empty() {
            return Err(PricelabError::InvalidInput {
                product_id,
                reason: "empty observation series".into(),
            });
        }

        for (i, obs) in observations.iter().enumerate() {
            if !obs.price.is_finite() || obs.price < 0.0 {
                return Err(PricelabError::InvalidInput {
                    product_id,
                    reason: format!("negative or non-finite price at observation {i}"),
                });
            }
            if !obs.units_sold.is_finite() || obs.units_sold < 0.0 {
                return Err(PricelabError::InvalidInput {
                    product_id,
                    reason: format!("negative or non-finite units_sold at observation {i}"),
                });
            }
        }

        Ok(Self {
            product_id,
            category,
            observations,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn mean_price(&self) -> f64 {
        let sum: f64 = self.observations.iter().map(|o| o.price).sum();
        sum / self.len() as f64
    }

    pub fn mean_units(&self) -> f64 {
        let sum: f64 = self.observations.iter().map(|o| o.units_sold).sum();
        sum / self.len() as f64
    }

    /// Sample variance of price (n-1 denominator). 0.0 for a single
    /// observation, so a one-point series reads as a degenerate price sample.
    pub fn price_variance(&self) -> f64 {
        sample_variance(self.observations.iter().map(|o| o.price), self.len())
    }

    /// Sample variance of units sold (n-1 denominator).
    pub fn units_variance(&self) -> f64 {
        sample_variance(self.observations.iter().map(|o| o.units_sold), self.len())
    }

    /// Sample covariance of price and units sold (n-1 denominator).
    pub fn price_units_covariance(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        let mean_p = self.mean_price();
        let mean_q = self.mean_units();
        let sum: f64 = self
            .observations
            .iter()
            .map(|o| (o.price - mean_p) * (o.units_sold - mean_q))
            .sum();
        sum / (self.len() - 1) as f64
    }

    pub fn min_price(&self) -> f64 {
        self.observations
            .iter()
            .map(|o| o.price)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_price(&self) -> f64 {
        self.observations
            .iter()
            .map(|o| o.price)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Round to 2 decimal places of currency precision.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sample_variance(values: impl Iterator<Item = f64> + Clone, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let mean: f64 = values.clone().sum::<f64>() / n as f64;
    let sum_sq: f64 = values.map(|v| (v - mean) * (v - mean)).sum();
    sum_sq / (n - 1) as f64
}
