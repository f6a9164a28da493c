//! Analysis configuration validation.
//!
//! Validates the `[analysis]` section before a batch run. Every key has a
//! default, so validation only rejects values that are present but
//! unusable.

use crate::domain::error::PricelabError;
use crate::ports::config_port::ConfigPort;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), PricelabError> {
    validate_grid_points(config)?;
    validate_bound_factors(config)?;
    validate_strategies(config)?;
    Ok(())
}

/// Parse the comma-separated `strategies` key ("-0.10, 0.0, 0.10") in its
/// configured order.
pub fn parse_strategies(input: &str) -> Result<Vec<f64>, PricelabError> {
    let mut strategies = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(strategies_invalid("empty token in strategy list"));
        }
        let pct: f64 = trimmed
            .parse()
            .map_err(|_| strategies_invalid(&format!("'{trimmed}' is not a number")))?;
        if !pct.is_finite() || pct <= -1.0 {
            return Err(strategies_invalid(&format!(
                "'{trimmed}' must be a finite change greater than -100%"
            )));
        }
        strategies.push(pct);
    }
    Ok(strategies)
}

fn strategies_invalid(reason: &str) -> PricelabError {
    PricelabError::ConfigInvalid {
        section: "analysis".to_string(),
        key: "strategies".to_string(),
        reason: reason.to_string(),
    }
}

fn validate_grid_points(config: &dyn ConfigPort) -> Result<(), PricelabError> {
    let value = config.get_int("analysis", "grid_points", 41);
    if value < 2 {
        return Err(PricelabError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "grid_points".to_string(),
            reason: "grid_points must be at least 2".to_string(),
        });
    }
    Ok(())
}

fn validate_bound_factors(config: &dyn ConfigPort) -> Result<(), PricelabError> {
    let lower = config.get_double("analysis", "lower_bound_factor", 0.7);
    let upper = config.get_double("analysis", "upper_bound_factor", 1.3);

    if lower <= 0.0 {
        return Err(PricelabError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "lower_bound_factor".to_string(),
            reason: "lower_bound_factor must be positive".to_string(),
        });
    }
    if upper < lower {
        return Err(PricelabError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "upper_bound_factor".to_string(),
            reason: "upper_bound_factor must not be below lower_bound_factor".to_string(),
        });
    }
    Ok(())
}

fn validate_strategies(config: &dyn ConfigPort) -> Result<(), PricelabError> {
    if let Some(raw) = config.get_string("analysis", "strategies") {
        parse_strategies(&raw)?;
    }
    Ok(())
}
