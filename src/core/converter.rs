//! Conversion driver - workbook in, one JSON document per sheet out

use crate::config::ConvertConfig;
use crate::error::{ConvertError, ConvertResult, SheetError};
use crate::excel::{sheet_to_document, WorkbookLoader};
use crate::naming::{document_file_name, sanitize_sheet_name};
use crate::types::{ConversionReport, IndexOutcome, SheetDocument, SheetOutcome, SheetOutput};
use crate::writer;
use std::collections::HashMap;
use std::fs;
use tracing::{info, warn};

/// Convert every sheet of the configured workbook.
///
/// Only problems with the workbook itself or the output directory are
/// returned as errors. Everything that goes wrong with an individual sheet, or
/// with the index, is recorded in the report and the run carries on.
pub fn convert(config: &ConvertConfig) -> ConvertResult<ConversionReport> {
    info!(
        input = %config.input.display(),
        output_dir = %config.output_dir.display(),
        dry_run = config.dry_run,
        "starting conversion"
    );

    // Open before touching the output directory, so a bad input changes nothing
    let mut loader = WorkbookLoader::open(&config.input)?;
    let sheet_names = loader.sheet_names();
    info!(count = sheet_names.len(), "found sheets");

    if !config.dry_run {
        fs::create_dir_all(&config.output_dir).map_err(|source| ConvertError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;
    }

    let mut claimed = ClaimedNames::new(config);

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let result = convert_sheet(&mut loader, &sheet_name, config, &mut claimed);
        match &result {
            Ok(output) => info!(
                sheet = %sheet_name,
                path = %output.path.display(),
                records = output.records,
                skipped = output.skipped,
                "converted sheet"
            ),
            Err(e) => warn!(sheet = %sheet_name, kind = e.kind(), error = %e, "sheet failed"),
        }
        sheets.push(SheetOutcome { sheet_name, result });
    }

    let index = write_category_index(config, &sheets);

    Ok(ConversionReport {
        input: config.input.clone(),
        output_dir: config.output_dir.clone(),
        dry_run: config.dry_run,
        sheets,
        index,
    })
}

fn convert_sheet(
    loader: &mut WorkbookLoader,
    sheet_name: &str,
    config: &ConvertConfig,
    claimed: &mut ClaimedNames,
) -> Result<SheetOutput, SheetError> {
    let (base_name, file_name) = claimed.check(sheet_name)?;

    let range = loader.sheet_range(sheet_name)?;
    let document = sheet_to_document(sheet_name, &range)?;

    let path = config.output_dir.join(&file_name);
    if !config.dry_run {
        writer::write_document(&path, &document.records)?;
    }

    claimed.claim(file_name, sheet_name);

    Ok(SheetOutput {
        base_name,
        path,
        records: document.records.len(),
        skipped: document.skipped,
    })
}

/// Output file names already taken in this run, mapped to whoever took them
struct ClaimedNames(HashMap<String, String>);

impl ClaimedNames {
    /// The index name is reserved up front when the index will be written
    fn new(config: &ConvertConfig) -> Self {
        let mut names = HashMap::new();
        if config.emit_index {
            names.insert(config.index_file_name.clone(), "the category index".to_string());
        }
        Self(names)
    }

    /// Base and file name for a sheet, or why it cannot have one
    fn check(&self, sheet_name: &str) -> Result<(String, String), SheetError> {
        let base_name = sanitize_sheet_name(sheet_name);
        if base_name.is_empty() {
            return Err(SheetError::UnnamedOutput(sheet_name.to_string()));
        }

        let file_name = document_file_name(&base_name);
        if let Some(previous) = self.0.get(&file_name) {
            return Err(SheetError::DuplicateOutput {
                file_name,
                previous: previous.clone(),
            });
        }

        Ok((base_name, file_name))
    }

    fn claim(&mut self, file_name: String, sheet_name: &str) {
        self.0.insert(file_name, format!("sheet {:?}", sheet_name));
    }
}

fn write_category_index(config: &ConvertConfig, sheets: &[SheetOutcome]) -> IndexOutcome {
    let categories: Vec<String> = sheets
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|output| output.base_name.clone())
        .collect();

    if !config.emit_index || categories.is_empty() {
        return IndexOutcome::Skipped;
    }

    let path = config.index_path();
    if config.dry_run {
        return IndexOutcome::Written(path);
    }

    match writer::write_index(&path, &categories) {
        Ok(()) => {
            info!(path = %path.display(), count = categories.len(), "wrote category index");
            IndexOutcome::Written(path)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "category index failed");
            IndexOutcome::Failed(e)
        }
    }
}

/// One sheet as `inspect` sees it
#[derive(Debug)]
pub struct SheetSummary {
    pub sheet_name: String,
    /// Target file name, or the naming error `convert` would report
    pub file_name: Result<String, SheetError>,
    pub document: Result<SheetDocument, SheetError>,
}

/// Read and convert every sheet without writing anything.
///
/// File names are claimed the same way `convert` claims them, so unusable
/// and clashing names show up here before a real run.
pub fn inspect(config: &ConvertConfig) -> ConvertResult<Vec<SheetSummary>> {
    let mut loader = WorkbookLoader::open(&config.input)?;
    let mut claimed = ClaimedNames::new(config);

    let mut summaries = Vec::new();
    for sheet_name in loader.sheet_names() {
        let file_name = claimed.check(&sheet_name).map(|(_, file_name)| file_name);
        let document = loader
            .sheet_range(&sheet_name)
            .and_then(|range| sheet_to_document(&sheet_name, &range));

        // Only sheets that convert would write go on to claim their name
        if let (Ok(name), Ok(_)) = (&file_name, &document) {
            claimed.claim(name.clone(), &sheet_name);
        }

        summaries.push(SheetSummary {
            sheet_name,
            file_name,
            document,
        });
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn written(name: &str) -> SheetOutcome {
        SheetOutcome {
            sheet_name: name.to_string(),
            result: Ok(SheetOutput {
                base_name: sanitize_sheet_name(name),
                path: PathBuf::from(document_file_name(&sanitize_sheet_name(name))),
                records: 1,
                skipped: 0,
            }),
        }
    }

    // An .xlsx workbook always holds at least one sheet, so a sheetless run
    // cannot be built as a fixture and is covered at this level instead
    #[test]
    fn test_no_sheets_skips_index() {
        let dir = TempDir::new().unwrap();
        let config = ConvertConfig {
            output_dir: dir.path().to_path_buf(),
            ..ConvertConfig::default()
        };

        let outcome = write_category_index(&config, &[]);
        assert!(matches!(outcome, IndexOutcome::Skipped));
        assert!(!config.index_path().exists());
    }

    #[test]
    fn test_index_written_for_successes() {
        let dir = TempDir::new().unwrap();
        let config = ConvertConfig {
            output_dir: dir.path().to_path_buf(),
            ..ConvertConfig::default()
        };
        let sheets = vec![
            written("Common Words"),
            SheetOutcome {
                sheet_name: "???".to_string(),
                result: Err(SheetError::UnnamedOutput("???".to_string())),
            },
            written("Relations"),
        ];

        let outcome = write_category_index(&config, &sheets);
        assert!(matches!(outcome, IndexOutcome::Written(_)));
        assert_eq!(
            fs::read_to_string(config.index_path()).unwrap(),
            "[\n  \"common_words\",\n  \"relations\"\n]"
        );
    }

    #[test]
    fn test_claimed_names() {
        let mut claimed = ClaimedNames::new(&ConvertConfig::default());

        let (base, file) = claimed.check("Verbs (Basic)").unwrap();
        assert_eq!(base, "verbs_basic");
        assert_eq!(file, "verbs_basic.json");
        claimed.claim(file, "Verbs (Basic)");

        match claimed.check("Verbs Basic") {
            Err(SheetError::DuplicateOutput { file_name, previous }) => {
                assert_eq!(file_name, "verbs_basic.json");
                assert_eq!(previous, "sheet \"Verbs (Basic)\"");
            }
            other => panic!("Expected DuplicateOutput, got {other:?}"),
        }
        assert!(matches!(claimed.check("???"), Err(SheetError::UnnamedOutput(_))));
    }

    #[test]
    fn test_claimed_names_reserve_index_only_when_emitted() {
        let config = ConvertConfig {
            index_file_name: "relations.json".to_string(),
            ..ConvertConfig::default()
        };
        assert!(matches!(
            ClaimedNames::new(&config).check("Relations"),
            Err(SheetError::DuplicateOutput { .. })
        ));

        let config = ConvertConfig {
            emit_index: false,
            ..config
        };
        assert!(ClaimedNames::new(&config).check("Relations").is_ok());
    }

    #[test]
    fn test_dry_run_index_not_written() {
        let dir = TempDir::new().unwrap();
        let config = ConvertConfig {
            output_dir: dir.path().to_path_buf(),
            dry_run: true,
            ..ConvertConfig::default()
        };

        let outcome = write_category_index(&config, &[written("Relations")]);
        assert!(matches!(outcome, IndexOutcome::Written(_)));
        assert!(!config.index_path().exists());
    }
}
