//! Workbook loader - opens an .xlsx file and hands out sheet grids

use crate::error::{ConvertError, ConvertResult, SheetError};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// An opened workbook
pub struct WorkbookLoader {
    workbook: Xlsx<BufReader<File>>,
}

impl WorkbookLoader {
    /// Open the workbook at `path`.
    ///
    /// A missing file is reported separately from one that exists but is not
    /// a readable .xlsx workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(ConvertError::WorkbookNotFound(path));
        }

        let workbook: Xlsx<_> =
            open_workbook(&path).map_err(|source| ConvertError::MalformedWorkbook {
                path: path.clone(),
                source,
            })?;

        Ok(Self { workbook })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Read the used cell range of one sheet
    pub fn sheet_range(&mut self, sheet_name: &str) -> Result<Range<Data>, SheetError> {
        self.workbook
            .worksheet_range(sheet_name)
            .map_err(|e| SheetError::Read(e.to_string()))
    }
}
