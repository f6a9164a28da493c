//! Batch analysis pipeline: fan out per product, fan in, aggregate.
//!
//! Every product is an independent unit of work (fit, optimize, curve,
//! strategies share nothing across products), so the batch maps products
//! across a rayon worker pool and merges in input order afterwards.

use rayon::prelude::*;

use crate::domain::catalog::{validate_catalog, CatalogEntry, SkippedProduct};
use crate::domain::correlation::{price_units_correlation, PriceUnitsCorrelation};
use crate::domain::demand::{fit_demand, DemandModel};
use crate::domain::error::PricelabError;
use crate::domain::observation::ProductSeries;
use crate::domain::optimizer::{optimize, PriceBounds};
use crate::domain::revenue_curve::{RevenueCurve, RevenueCurvePoint};
use crate::domain::strategy::{best_strategy, simulate_strategies, StrategyResult};
use crate::domain::summary::{aggregate, SummaryRow};

/// Tunable analysis parameters. The defaults mirror the reference
/// configuration: ±10% strategies, a 41-point grid, and a 0.7/1.3 clamp
/// window around the observed price range.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub strategies: Vec<f64>,
    pub grid_points: usize,
    pub lower_bound_factor: f64,
    pub upper_bound_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategies: vec![-0.10, 0.0, 0.10],
            grid_points: 41,
            lower_bound_factor: 0.7,
            upper_bound_factor: 1.3,
        }
    }
}

/// All four stage outputs for one product.
#[derive(Debug, Clone)]
pub struct ProductAnalysis {
    pub model: DemandModel,
    pub correlation: PriceUnitsCorrelation,
    pub curve: Vec<RevenueCurvePoint>,
    pub strategies: Vec<StrategyResult>,
    pub best_strategy: Option<StrategyResult>,
    pub bounds_fallback: bool,
}

/// Run the four-stage pipeline for a single validated series.
pub fn analyze_product(
    series: &ProductSeries,
    config: &AnalysisConfig,
) -> Result<ProductAnalysis, PricelabError> {
    let fit = fit_demand(series);
    let bounds = PriceBounds::from_series(
        series,
        config.lower_bound_factor,
        config.upper_bound_factor,
    );

    let optimal = optimize(series, &fit, &bounds)?;
    let correlation = price_units_correlation(series);
    let curve: Vec<RevenueCurvePoint> = RevenueCurve::new(
        series.product_id(),
        series.category(),
        fit,
        bounds,
        config.grid_points,
    )
    .collect();
    let strategies = simulate_strategies(series, &fit, &config.strategies)?;
    let best = best_strategy(&strategies).cloned();

    let (a, b) = match fit.coefficients() {
        Some((a, b)) => (Some(a), Some(b)),
        None => (None, None),
    };

    Ok(ProductAnalysis {
        model: DemandModel {
            product_id: series.product_id().to_string(),
            category: series.category().to_string(),
            a,
            b,
            optimal_price: optimal.price,
            optimal_revenue: optimal.revenue,
        },
        correlation,
        curve,
        strategies,
        best_strategy: best,
        bounds_fallback: bounds.fallback,
    })
}

/// Full batch output: the four stage tables, the joined summary, and the
/// diagnostics for products that were dropped or flagged along the way.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub models: Vec<DemandModel>,
    pub correlations: Vec<PriceUnitsCorrelation>,
    pub curves: Vec<RevenueCurvePoint>,
    pub strategies: Vec<StrategyResult>,
    pub summary: Vec<SummaryRow>,
    pub skipped: Vec<SkippedProduct>,
    /// Products whose clamp window fell back to the literal observed bounds.
    pub bounds_warnings: Vec<String>,
}

/// Analyze a whole catalog.
///
/// Invalid products are skipped and reported, never fatal to the batch.
/// [`PricelabError::UnfittableModel`] marks a broken upstream invariant and
/// aborts the whole run.
pub fn run_analysis(
    entries: Vec<CatalogEntry>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, PricelabError> {
    let validation = validate_catalog(entries);
    let mut skipped = validation.skipped;

    let outcomes: Vec<Result<ProductAnalysis, PricelabError>> = validation
        .products
        .par_iter()
        .map(|series| analyze_product(series, config))
        .collect();

    let mut analyses = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(analysis) => analyses.push(analysis),
            Err(PricelabError::InvalidInput { product_id, reason }) => {
                skipped.push(SkippedProduct { product_id, reason });
            }
            Err(err) => return Err(err),
        }
    }

    let models: Vec<DemandModel> = analyses.iter().map(|a| a.model.clone()).collect();
    let correlations: Vec<PriceUnitsCorrelation> =
        analyses.iter().map(|a| a.correlation.clone()).collect();
    let curves: Vec<RevenueCurvePoint> =
        analyses.iter().flat_map(|a| a.curve.clone()).collect();
    let strategies: Vec<StrategyResult> =
        analyses.iter().flat_map(|a| a.strategies.clone()).collect();
    let best: Vec<StrategyResult> = analyses
        .iter()
        .filter_map(|a| a.best_strategy.clone())
        .collect();
    let bounds_warnings: Vec<String> = analyses
        .iter()
        .filter(|a| a.bounds_fallback)
        .map(|a| a.model.product_id.clone())
        .collect();

    let summary = aggregate(&models, &correlations, &best);

    Ok(AnalysisReport {
        models,
        correlations,
        curves,
        strategies,
        summary,
        skipped,
        bounds_warnings,
    })
}
