use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that abort the whole run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("File not found: {}", .0.display())]
    WorkbookNotFound(PathBuf),

    #[error("Error reading Excel file {}. Is it a valid .xlsx file? {source}", .path.display())]
    MalformedWorkbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("Error creating output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors that fail a single sheet (or the index) while the run continues.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Could not read sheet: {0}")]
    Read(String),

    #[error("Cell {cell} holds a spreadsheet error ({error})")]
    CellError { cell: String, error: String },

    #[error("Sheet name {0:?} leaves no usable characters for a file name")]
    UnnamedOutput(String),

    #[error("{file_name} is already produced by {previous}")]
    DuplicateOutput { file_name: String, previous: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetError {
    /// Stable label for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SheetError::Read(_) => "read",
            SheetError::CellError { .. } => "cell-error",
            SheetError::UnnamedOutput(_) => "unnamed-output",
            SheetError::DuplicateOutput { .. } => "duplicate-output",
            SheetError::Write { .. } => "write",
            SheetError::Json(_) => "json",
        }
    }
}
