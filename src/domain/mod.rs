//! Core domain types and logic.

pub mod observation;
pub mod catalog;
pub mod correlation;
pub mod demand;
pub mod optimizer;
pub mod revenue_curve;
pub mod strategy;
pub mod summary;
pub mod pipeline;
pub mod config_validation;
pub mod error;
