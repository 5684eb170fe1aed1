use crate::error::SheetError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;

//==============================================================================
// Records
//==============================================================================

/// One converted data row: field name → text value, in header order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.push((field.into(), value.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// Serialized as a JSON object whose keys keep header order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// A sheet converted to records, before it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDocument {
    pub sheet_name: String,
    /// Field names from the header row, deduplicated
    pub fields: Vec<String>,
    pub records: Vec<Record>,
    /// Data rows excluded because a field had no value
    pub skipped: usize,
}

impl SheetDocument {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            fields: Vec::new(),
            records: Vec::new(),
            skipped: 0,
        }
    }

    /// Data rows seen in the sheet (kept + skipped)
    pub fn row_count(&self) -> usize {
        self.records.len() + self.skipped
    }
}

//==============================================================================
// Outcomes
//==============================================================================

/// A document that was written (or would be, in a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOutput {
    /// Category name (file name without extension)
    pub base_name: String,
    pub path: PathBuf,
    pub records: usize,
    pub skipped: usize,
}

/// Result of processing one sheet
#[derive(Debug)]
pub struct SheetOutcome {
    pub sheet_name: String,
    pub result: Result<SheetOutput, SheetError>,
}

/// What happened to the category index
#[derive(Debug)]
pub enum IndexOutcome {
    Written(PathBuf),
    /// Disabled, or no documents were produced
    Skipped,
    Failed(SheetError),
}

/// Everything one conversion run produced, in sheet order
#[derive(Debug)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub sheets: Vec<SheetOutcome>,
    pub index: IndexOutcome,
}

impl ConversionReport {
    pub fn outputs(&self) -> impl Iterator<Item = &SheetOutput> {
        self.sheets.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &SheetError)> {
        self.sheets
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.sheet_name.as_str(), e)))
    }

    /// Base names of produced documents, as listed in the index
    pub fn categories(&self) -> Vec<String> {
        self.outputs().map(|o| o.base_name.clone()).collect()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0 && !matches!(self.index, IndexOutcome::Failed(_))
    }
}
