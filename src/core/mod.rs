//! Conversion driver

pub mod converter;

pub use converter::{convert, inspect, SheetSummary};
