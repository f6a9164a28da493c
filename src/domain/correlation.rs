//! Pearson correlation between price and units sold.

use crate::domain::observation::ProductSeries;

/// Per-product correlation row. `correlation` is NaN when either side of the
/// series has zero variance (including single-observation series).
#[derive(Debug, Clone)]
pub struct PriceUnitsCorrelation {
    pub product_id: String,
    pub correlation: f64,
}

/// cov(price, units) / (std(price) * std(units)), sample moments throughout.
pub fn price_units_correlation(series: &ProductSeries) -> PriceUnitsCorrelation {
    let var_p = series.price_variance();
    let var_q = series.units_variance();

    let correlation = if var_p > 0.0 && var_q > 0.0 {
        series.price_units_covariance() / (var_p.sqrt() * var_q.sqrt())
    } else {
        f64::NAN
    };

    PriceUnitsCorrelation {
        product_id: series.product_id().to_string(),
        correlation,
    }
}
