//! # router4g-cli
//!
//! Command-line interface for resetting a 4G router's WAN IP.
//!
//! ## Features
//!
//! - **Status**: connection state, WAN IP, uptime and signal strength
//! - **Reset**: connection cycle, full restart, or both with fallback
//! - **Config file**: router address, credentials, timings and endpoint paths
//! - **Multiple output formats**: Pretty, JSON, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
