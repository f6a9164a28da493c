//! CSV report adapter.
//!
//! Writes the five analysis tables as CSV files in the output directory:
//! correlation, fitted model/optimum, revenue curves, strategy simulations,
//! and the joined summary.

use std::fs;
use std::path::Path;

use crate::domain::error::PricelabError;
use crate::domain::pipeline::AnalysisReport;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn fmt(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt).unwrap_or_default()
}

fn report_err(file: &str, err: impl std::fmt::Display) -> PricelabError {
    PricelabError::Report {
        reason: format!("failed to write {file}: {err}"),
    }
}

fn open_writer(
    output_dir: &Path,
    file: &str,
) -> Result<csv::Writer<fs::File>, PricelabError> {
    csv::Writer::from_path(output_dir.join(file)).map_err(|e| report_err(file, e))
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &AnalysisReport, output_dir: &Path) -> Result<(), PricelabError> {
        fs::create_dir_all(output_dir).map_err(|e| PricelabError::Report {
            reason: format!("failed to create {}: {}", output_dir.display(), e),
        })?;

        let file = "price_units_correlation.csv";
        let mut wtr = open_writer(output_dir, file)?;
        wtr.write_record(["Product_ID", "Corr_Price_Units"])
            .map_err(|e| report_err(file, e))?;
        for row in &report.correlations {
            wtr.write_record([row.product_id.clone(), fmt(row.correlation)])
                .map_err(|e| report_err(file, e))?;
        }
        wtr.flush().map_err(|e| report_err(file, e))?;

        let file = "linear_demand_and_optimal_price.csv";
        let mut wtr = open_writer(output_dir, file)?;
        wtr.write_record(["Product_ID", "Category", "a", "b", "P_opt", "Rev_opt"])
            .map_err(|e| report_err(file, e))?;
        for row in &report.models {
            wtr.write_record([
                row.product_id.clone(),
                row.category.clone(),
                fmt_opt(row.a),
                fmt_opt(row.b),
                fmt(row.optimal_price),
                fmt(row.optimal_revenue),
            ])
            .map_err(|e| report_err(file, e))?;
        }
        wtr.flush().map_err(|e| report_err(file, e))?;

        let file = "revenue_curves.csv";
        let mut wtr = open_writer(output_dir, file)?;
        wtr.write_record(["Product_ID", "Category", "Price", "Pred_Units", "Pred_Revenue"])
            .map_err(|e| report_err(file, e))?;
        for row in &report.curves {
            wtr.write_record([
                row.product_id.clone(),
                row.category.clone(),
                fmt(row.price),
                fmt(row.predicted_units),
                fmt(row.predicted_revenue),
            ])
            .map_err(|e| report_err(file, e))?;
        }
        wtr.flush().map_err(|e| report_err(file, e))?;

        let file = "strategy_simulations.csv";
        let mut wtr = open_writer(output_dir, file)?;
        wtr.write_record([
            "Product_ID",
            "Category",
            "Strategy",
            "New_Price",
            "Expected_Units",
            "Expected_Revenue",
        ])
        .map_err(|e| report_err(file, e))?;
        for row in &report.strategies {
            wtr.write_record([
                row.product_id.clone(),
                row.category.clone(),
                row.strategy_label.clone(),
                fmt(row.new_price),
                fmt(row.expected_units),
                fmt(row.expected_revenue),
            ])
            .map_err(|e| report_err(file, e))?;
        }
        wtr.flush().map_err(|e| report_err(file, e))?;

        let file = "optimal_and_best_strategy_summary.csv";
        let mut wtr = open_writer(output_dir, file)?;
        wtr.write_record([
            "Product_ID",
            "Category",
            "a",
            "b",
            "P_opt",
            "Rev_opt",
            "Corr_Price_Units",
            "Best_Strategy",
            "New_Price",
            "Expected_Units",
            "Expected_Revenue",
        ])
        .map_err(|e| report_err(file, e))?;
        for row in &report.summary {
            wtr.write_record([
                row.product_id.clone(),
                row.category.clone(),
                fmt_opt(row.a),
                fmt_opt(row.b),
                fmt(row.optimal_price),
                fmt(row.optimal_revenue),
                fmt_opt(row.correlation),
                row.best_strategy.clone().unwrap_or_default(),
                fmt_opt(row.best_new_price),
                fmt_opt(row.best_expected_units),
                fmt_opt(row.best_expected_revenue),
            ])
            .map_err(|e| report_err(file, e))?;
        }
        wtr.flush().map_err(|e| report_err(file, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogEntry;
    use crate::domain::observation::Observation;
    use crate::domain::pipeline::{run_analysis, AnalysisConfig};

    fn sample_report() -> AnalysisReport {
        let entries = vec![
            CatalogEntry {
                product_id: "P001".into(),
                category: "Home".into(),
                observations: vec![
                    Observation {
                        price: 10.0,
                        units_sold: 100.0,
                    },
                    Observation {
                        price: 20.0,
                        units_sold: 80.0,
                    },
                    Observation {
                        price: 30.0,
                        units_sold: 60.0,
                    },
                ],
            },
            CatalogEntry {
                product_id: "P002".into(),
                category: "Grocery".into(),
                observations: vec![Observation {
                    price: 15.0,
                    units_sold: 50.0,
                }],
            },
        ];
        run_analysis(entries, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn writes_all_five_tables() {
        let dir = tempfile::tempdir().unwrap();
        CsvReportAdapter::new()
            .write(&sample_report(), dir.path())
            .unwrap();

        for file in [
            "price_units_correlation.csv",
            "linear_demand_and_optimal_price.csv",
            "revenue_curves.csv",
            "strategy_simulations.csv",
            "optimal_and_best_strategy_summary.csv",
        ] {
            assert!(dir.path().join(file).exists(), "missing {file}");
        }
    }

    #[test]
    fn model_table_has_one_row_per_product() {
        let dir = tempfile::tempdir().unwrap();
        CsvReportAdapter::new()
            .write(&sample_report(), dir.path())
            .unwrap();

        let content =
            fs::read_to_string(dir.path().join("linear_demand_and_optimal_price.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("P001,Home,"));
        // Flat-fit product: empty a/b fields.
        assert!(lines[2].starts_with("P002,Grocery,,,"));
    }

    #[test]
    fn nan_correlation_is_written_empty() {
        let dir = tempfile::tempdir().unwrap();
        CsvReportAdapter::new()
            .write(&sample_report(), dir.path())
            .unwrap();

        let content = fs::read_to_string(dir.path().join("price_units_correlation.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[2], "P002,");
    }

    #[test]
    fn curve_table_has_grid_points_rows_per_product() {
        let dir = tempfile::tempdir().unwrap();
        CsvReportAdapter::new()
            .write(&sample_report(), dir.path())
            .unwrap();

        let content = fs::read_to_string(dir.path().join("revenue_curves.csv")).unwrap();
        // Header + 41 points for each of the two products.
        assert_eq!(content.lines().count(), 1 + 82);
    }
}
