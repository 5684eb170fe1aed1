//! Excel reading: workbook loading and sheet → record conversion

mod loader;
pub mod records;

pub use loader::WorkbookLoader;
pub use records::{cell_text, sheet_to_document};
