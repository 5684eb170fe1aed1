//! JSON output: sheet documents and the category index
//!
//! Both files are pretty-printed with two-space indentation, non-ASCII text is
//! written as-is, and there is no trailing newline. Existing files are
//! overwritten.

use crate::error::SheetError;
use crate::types::Record;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Render a value the way every output file is formatted
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, SheetError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write one sheet document (a JSON array of records)
pub fn write_document(path: &Path, records: &[Record]) -> Result<(), SheetError> {
    let json = render(records)?;
    write_file(path, &json)
}

/// Write the category index (a JSON array of document base names)
pub fn write_index(path: &Path, categories: &[String]) -> Result<(), SheetError> {
    let json = render(categories)?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<(), SheetError> {
    fs::write(path, content).map_err(|source| SheetError::Write {
        path: path.to_path_buf(),
        source,
    })
}
