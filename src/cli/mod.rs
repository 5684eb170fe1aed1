//! CLI command handlers

pub mod commands;

pub use commands::{convert, inspect, load_config, report_fatal};
