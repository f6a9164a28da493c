//! Integration tests for the full analysis pipeline.
//!
//! Tests cover:
//! - Fit → optimize → curve → strategies → summary for a clean linear product
//! - Flat fallback for zero-price-variance products at every stage
//! - The reference strategy set against a known model
//! - Per-product failure isolation (bad products skipped, batch continues)
//! - Deterministic re-runs and aggregation ordering

mod common;

use approx::assert_relative_eq;
use common::*;
use pricelab::domain::pipeline::{analyze_product, run_analysis, AnalysisConfig};
use pricelab::ports::data_port::DataPort;

mod full_pipeline {
    use super::*;

    #[test]
    fn linear_product_through_all_stages() {
        let port = MockDataPort::new().with_entry(
            "P001",
            "Electronics",
            &[(10.0, 100.0), (20.0, 80.0), (30.0, 60.0)],
        );
        let catalog = port.fetch_catalog().unwrap();
        let report = run_analysis(catalog, &AnalysisConfig::default()).unwrap();

        // Fitter: units = 120 - 2 * price, perfect fit.
        let model = &report.models[0];
        assert_relative_eq!(model.a.unwrap(), 120.0, epsilon = 1e-9);
        assert_relative_eq!(model.b.unwrap(), -2.0, epsilon = 1e-9);

        // Optimizer: vertex 30 inside the [7, 39] window.
        assert_relative_eq!(model.optimal_price, 30.0, epsilon = 1e-9);
        assert_relative_eq!(model.optimal_revenue, 1800.0, epsilon = 1e-9);

        // Correlation: perfectly negative.
        assert_relative_eq!(report.correlations[0].correlation, -1.0, epsilon = 1e-12);

        // Curve: 41 points spanning [7, 39], units never negative.
        assert_eq!(report.curves.len(), 41);
        assert_relative_eq!(report.curves[0].price, 7.0, epsilon = 1e-9);
        assert_relative_eq!(report.curves[40].price, 39.0, epsilon = 1e-9);
        assert!(report.curves.iter().all(|p| p.predicted_units >= 0.0));

        // Summary: single joined row.
        assert_eq!(report.summary.len(), 1);
        let row = &report.summary[0];
        assert_eq!(row.product_id, "P001");
        assert_relative_eq!(row.correlation.unwrap(), -1.0, epsilon = 1e-12);
        assert!(row.best_strategy.is_some());
    }

    #[test]
    fn zero_variance_product_uses_flat_fallback_everywhere() {
        let port = MockDataPort::new().with_entry(
            "P002",
            "Grocery",
            &[(15.0, 50.0), (15.0, 52.0), (15.0, 48.0)],
        );
        let report =
            run_analysis(port.fetch_catalog().unwrap(), &AnalysisConfig::default()).unwrap();

        let model = &report.models[0];
        assert!(model.a.is_none());
        assert!(model.b.is_none());

        // Optimizer compares the clamp-window endpoints with flat demand 50:
        // 10.5 * 50 = 525 vs 19.5 * 50 = 975.
        assert_relative_eq!(model.optimal_price, 19.5, epsilon = 1e-9);
        assert_relative_eq!(model.optimal_revenue, 975.0, epsilon = 1e-9);

        assert!(report.correlations[0].correlation.is_nan());
        assert!(report
            .curves
            .iter()
            .all(|p| (p.predicted_units - 50.0).abs() < 1e-9));
        assert!(report
            .strategies
            .iter()
            .all(|s| (s.expected_units - 50.0).abs() < 1e-9));
    }

    #[test]
    fn reference_strategy_set_against_known_model() {
        // Mean observed price 50; fitted line is exactly units = 200 - 3p.
        let port = MockDataPort::new().with_entry(
            "P003",
            "Beauty",
            &[(40.0, 80.0), (50.0, 50.0), (60.0, 20.0)],
        );
        let report =
            run_analysis(port.fetch_catalog().unwrap(), &AnalysisConfig::default()).unwrap();

        let revenues: Vec<f64> = report.strategies.iter().map(|s| s.expected_revenue).collect();
        assert_eq!(report.strategies.len(), 3);
        assert_relative_eq!(report.strategies[0].new_price, 45.0, epsilon = 1e-9);
        assert_relative_eq!(revenues[0], 2925.0, epsilon = 1e-9);
        assert_relative_eq!(revenues[1], 2500.0, epsilon = 1e-9);
        assert_relative_eq!(revenues[2], 1925.0, epsilon = 1e-9);

        assert_eq!(
            report.summary[0].best_strategy.as_deref(),
            Some("-10%")
        );
        assert_relative_eq!(report.summary[0].best_expected_revenue.unwrap(), 2925.0);
    }
}

mod batch_behavior {
    use super::*;

    #[test]
    fn bad_products_are_skipped_and_reported() {
        let port = MockDataPort::new()
            .with_entry("P001", "Home", &[(10.0, 100.0), (20.0, 80.0)])
            .with_entry("P002", "Home", &[(10.0, -5.0)])
            .with_entry("P003", "Home", &[])
            .with_entry("P004", "Home", &[(5.0, 40.0), (7.0, 30.0)]);
        let report =
            run_analysis(port.fetch_catalog().unwrap(), &AnalysisConfig::default()).unwrap();

        assert_eq!(report.models.len(), 2);
        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.skipped.len(), 2);

        let skipped_ids: Vec<&str> = report
            .skipped
            .iter()
            .map(|s| s.product_id.as_str())
            .collect();
        assert_eq!(skipped_ids, vec!["P002", "P003"]);

        // Skipped products appear in no output table.
        assert!(report.summary.iter().all(|r| r.product_id != "P002"));
        assert!(report.curves.iter().all(|p| p.product_id != "P003"));
        assert!(report.strategies.iter().all(|s| s.product_id != "P002"));
    }

    #[test]
    fn summary_preserves_catalog_order() {
        let port = MockDataPort::new()
            .with_entry("P009", "Home", &[(10.0, 10.0)])
            .with_entry("P001", "Home", &[(10.0, 10.0)])
            .with_entry("P005", "Home", &[(10.0, 10.0)]);
        let report =
            run_analysis(port.fetch_catalog().unwrap(), &AnalysisConfig::default()).unwrap();

        let ids: Vec<&str> = report
            .summary
            .iter()
            .map(|r| r.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P009", "P001", "P005"]);
    }

    #[test]
    fn reruns_are_deterministic() {
        let entries = vec![
            make_entry("P001", "Home", &[(12.5, 90.0), (17.0, 70.0), (22.5, 55.0)]),
            make_entry("P002", "Grocery", &[(3.0, 300.0), (3.5, 250.0)]),
        ];
        let config = AnalysisConfig::default();

        let first = run_analysis(entries.clone(), &config).unwrap();
        let second = run_analysis(entries, &config).unwrap();

        assert_eq!(first.curves, second.curves);
        assert_eq!(first.models.len(), second.models.len());
        for (a, b) in first.models.iter().zip(second.models.iter()) {
            assert_eq!(a.a, b.a);
            assert_eq!(a.b, b.b);
            assert_eq!(a.optimal_price, b.optimal_price);
            assert_eq!(a.optimal_revenue, b.optimal_revenue);
        }
    }

    #[test]
    fn data_port_errors_propagate() {
        let port = MockDataPort::new().with_error("backend unavailable");
        assert!(port.fetch_catalog().is_err());
    }
}

mod per_product_stage {
    use super::*;

    #[test]
    fn analyze_product_matches_batch_output() {
        let series = make_series("P001", "Home", &[(10.0, 100.0), (20.0, 80.0), (30.0, 60.0)]);
        let analysis = analyze_product(&series, &AnalysisConfig::default()).unwrap();

        assert_relative_eq!(analysis.model.optimal_price, 30.0, epsilon = 1e-9);
        assert_eq!(analysis.curve.len(), 41);
        assert_eq!(analysis.strategies.len(), 3);
        assert!(!analysis.bounds_fallback);
        // Raising price toward the vertex at 30 improves revenue.
        assert_eq!(analysis.best_strategy.unwrap().strategy_label, "10%");
    }

    #[test]
    fn zero_min_price_product_is_flagged_not_failed() {
        let series = make_series("P001", "Home", &[(0.0, 100.0), (10.0, 50.0)]);
        let analysis = analyze_product(&series, &AnalysisConfig::default()).unwrap();

        assert!(analysis.bounds_fallback);
        assert_relative_eq!(analysis.curve[0].price, 0.0, epsilon = 1e-12);
        assert_relative_eq!(analysis.curve[40].price, 10.0, epsilon = 1e-12);
    }
}
