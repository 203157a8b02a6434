//! Core domain types and logic. Pure functions, no I/O.

pub mod error;
pub mod returns;
pub mod observation;
pub mod autocorrelation;
pub mod classifier;
pub mod strategy;
pub mod position;
pub mod metrics;
pub mod backtest;
pub mod synthetic;
pub mod analysis;
pub mod config_validation;
