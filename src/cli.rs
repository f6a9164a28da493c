//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{parse_strategies, validate_analysis_config};
use crate::domain::error::PricelabError;
use crate::domain::pipeline::{run_analysis, AnalysisConfig};
use crate::domain::summary::SummaryRow;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "pricelab", about = "Price/demand analysis for a product catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a weekly observations CSV and write report tables
    Analyze {
        /// Observations CSV (Product_ID,Category,Week,Price,Units_Sold)
        #[arg(short, long)]
        input: PathBuf,
        /// Directory for the report CSVs
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated product ids to restrict the run to
        #[arg(long)]
        products: Option<String>,
    },
    /// Show per-product observation counts and price ranges
    Info {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Validate an analysis configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            input,
            output,
            config,
            products,
        } => run_analyze(&input, &output, config.as_ref(), products.as_deref()),
        Command::Info { input } => run_info(&input),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PricelabError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build [`AnalysisConfig`] from the `[analysis]` section, with reference
/// defaults for every absent key.
pub fn build_analysis_config(adapter: &dyn ConfigPort) -> Result<AnalysisConfig, PricelabError> {
    let defaults = AnalysisConfig::default();

    let strategies = match adapter.get_string("analysis", "strategies") {
        Some(raw) => parse_strategies(&raw)?,
        None => defaults.strategies,
    };

    let grid_points = adapter.get_int("analysis", "grid_points", defaults.grid_points as i64);

    Ok(AnalysisConfig {
        strategies,
        grid_points: grid_points as usize,
        lower_bound_factor: adapter.get_double(
            "analysis",
            "lower_bound_factor",
            defaults.lower_bound_factor,
        ),
        upper_bound_factor: adapter.get_double(
            "analysis",
            "upper_bound_factor",
            defaults.upper_bound_factor,
        ),
    })
}

fn run_analyze(
    input: &PathBuf,
    output: &PathBuf,
    config_path: Option<&PathBuf>,
    products: Option<&str>,
) -> ExitCode {
    // Stage 1: resolve analysis configuration
    let analysis_config = if let Some(path) = config_path {
        eprintln!("Loading config from {}", path.display());
        let adapter = match load_config(path) {
            Ok(a) => a,
            Err(code) => return code,
        };
        if let Err(e) = validate_analysis_config(&adapter) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        match build_analysis_config(&adapter) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    } else {
        AnalysisConfig::default()
    };

    // Stage 2: ingest observations
    eprintln!("Loading observations from {}", input.display());
    let mut catalog = match CsvAdapter::new(input.clone()).fetch_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(filter) = products {
        let wanted: Vec<String> = filter
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        catalog.retain(|entry| wanted.iter().any(|w| w == &entry.product_id));
    }
    eprintln!("Analyzing {} products...", catalog.len());

    // Stage 3: run the batch pipeline
    let report = match run_analysis(catalog, &analysis_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for product_id in &report.bounds_warnings {
        eprintln!(
            "warning: {product_id}: malformed price bounds, using observed range unclamped"
        );
    }
    for skip in &report.skipped {
        eprintln!("warning: skipping {}: {}", skip.product_id, skip.reason);
    }

    // Stage 4: write report tables
    if let Err(e) = CsvReportAdapter::new().write(&report, output) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Reports written to {}", output.display());

    print_summary_head(&report.summary);
    println!(
        "{} products analyzed, {} skipped",
        report.summary.len(),
        report.skipped.len()
    );
    ExitCode::SUCCESS
}

fn print_summary_head(summary: &[SummaryRow]) {
    println!(
        "{:<10} {:<12} {:>10} {:>8} {:>8} {:>10} {:>6} {:>5}",
        "Product", "Category", "a", "b", "P_opt", "Rev_opt", "Corr", "Best"
    );
    for row in summary.iter().take(10) {
        println!(
            "{:<10} {:<12} {:>10} {:>8} {:>8.2} {:>10.2} {:>6} {:>5}",
            row.product_id,
            row.category,
            fmt_cell(row.a, 2),
            fmt_cell(row.b, 3),
            row.optimal_price,
            row.optimal_revenue,
            fmt_cell(row.correlation, 2),
            row.best_strategy.as_deref().unwrap_or("-"),
        );
    }
    if summary.len() > 10 {
        println!("... {} more", summary.len() - 10);
    }
}

fn fmt_cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => "-".to_string(),
    }
}

fn run_info(input: &PathBuf) -> ExitCode {
    let catalog = match CsvAdapter::new(input.clone()).fetch_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!(
        "{:<10} {:<12} {:>6} {:>10} {:>10}",
        "Product", "Category", "Weeks", "Min price", "Max price"
    );
    for entry in &catalog {
        let min = entry
            .observations
            .iter()
            .map(|o| o.price)
            .fold(f64::INFINITY, f64::min);
        let max = entry
            .observations
            .iter()
            .map(|o| o.price)
            .fold(f64::NEG_INFINITY, f64::max);
        println!(
            "{:<10} {:<12} {:>6} {:>10.2} {:>10.2}",
            entry.product_id,
            entry.category,
            entry.observations.len(),
            min,
            max
        );
    }
    println!("{} products", catalog.len());
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    println!("{} is valid", config_path.display());
    ExitCode::SUCCESS
}
