//! sheetjson - Excel workbook to JSON documents
//!
//! Every sheet of an `.xlsx` workbook becomes one JSON array of records, named
//! after the sheet. A category index listing the produced documents is written
//! alongside them.
//!
//! # Features
//!
//! - First row of each sheet names the fields, later rows become records
//! - Rows with a missing value are left out
//! - Field order, and non-ASCII text, preserved as-is in the output
//! - Per-sheet failures are collected in a report instead of aborting the run
//!
//! # Example
//!
//! ```no_run
//! use sheetjson::config::ConvertConfig;
//! use sheetjson::core::convert;
//!
//! let config = ConvertConfig {
//!     input: "Aakhar_list.xlsx".into(),
//!     output_dir: "assets/data".into(),
//!     ..ConvertConfig::default()
//! };
//! let report = convert(&config)?;
//!
//! println!("Categories: {:?}", report.categories());
//! for (sheet, error) in report.failures() {
//!     println!("{sheet}: {error}");
//! }
//! # Ok::<(), sheetjson::error::ConvertError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod naming;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::ConvertConfig;
pub use error::{ConvertError, ConvertResult, SheetError};
pub use types::{ConversionReport, IndexOutcome, Record, SheetOutcome, SheetOutput};
