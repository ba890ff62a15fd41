//! sirbench library: application logic for the parallel SIR benchmark.

pub mod app;
pub mod config;
pub mod errors;
