//! Demonstration driver for the account ledger.

pub mod config;
pub mod render;
pub mod scenario;

pub use config::{DemoConfig, OutputFormat};
