use crate::config::{ConfigFile, ConfigOverrides, ConvertConfig};
use crate::core::SheetSummary;
use crate::error::{ConvertError, ConvertResult};
use crate::types::{ConversionReport, IndexOutcome};
use colored::Colorize;
use std::path::PathBuf;

/// Layer the optional config file and command-line overrides
pub fn load_config(
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
) -> ConvertResult<ConvertConfig> {
    let file = match config_file {
        Some(path) => Some(ConfigFile::load(&path)?),
        None => None,
    };
    ConvertConfig::resolve(file, overrides)
}

/// Execute the convert command
pub fn convert(config: &ConvertConfig, verbose: bool) -> ConvertResult<ConversionReport> {
    println!("{}", "📗 sheetjson - Workbook → JSON".bold().green());
    println!("   Input:  {}", config.input.display());
    println!("   Output: {}", config.output_dir.display());
    if config.emit_index {
        println!("   Index:  {}", config.index_file_name);
    }
    println!();

    if config.dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No files will be written\n".yellow()
        );
    }

    let report = crate::core::convert(config)?;

    if report.sheets.is_empty() {
        println!("{}", "⚠️  Workbook has no sheets".yellow());
    }

    for outcome in &report.sheets {
        match &outcome.result {
            Ok(output) => {
                println!(
                    "   {} {} → {} ({} records)",
                    "✅".green(),
                    outcome.sheet_name.bright_blue(),
                    output.path.display(),
                    output.records
                );
                if verbose && output.skipped > 0 {
                    println!(
                        "      {} rows skipped (missing values)",
                        output.skipped.to_string().yellow()
                    );
                }
            }
            Err(e) => {
                println!(
                    "   {} {}: {}",
                    "❌".red(),
                    outcome.sheet_name.bright_blue(),
                    e.to_string().red()
                );
            }
        }
    }

    match &report.index {
        IndexOutcome::Written(path) => {
            println!("\n   📇 Category index: {}", path.display());
        }
        IndexOutcome::Skipped => {
            if verbose {
                println!("\n   📇 Category index skipped");
            }
        }
        IndexOutcome::Failed(e) => {
            println!(
                "\n   {} Category index: {}",
                "❌".red(),
                e.to_string().red()
            );
        }
    }

    println!();
    let summary = summary_line(&report);
    if report.is_clean() {
        println!("{}", format!("✅ {}", summary).bold().green());
    } else {
        println!("{}", format!("⚠️  {}", summary).bold().yellow());
    }

    Ok(report)
}

/// Execute the inspect command
pub fn inspect(config: &ConvertConfig, verbose: bool) -> ConvertResult<Vec<SheetSummary>> {
    println!("{}", "🔍 sheetjson - Inspect workbook".bold().green());
    println!("   File: {}\n", config.input.display());

    let summaries = crate::core::inspect(config)?;
    println!("   Found {} sheets\n", summaries.len());

    for summary in &summaries {
        let target = match &summary.file_name {
            Ok(file_name) => file_name.clone(),
            Err(e) => format!("{} {}", "❌".red(), e.to_string().red()),
        };
        println!("   📊 {} → {}", summary.sheet_name.bright_blue().bold(), target);

        match &summary.document {
            Ok(document) => {
                println!(
                    "      {} fields, {} rows, {} kept",
                    document.fields.len(),
                    document.row_count(),
                    document.records.len()
                );
                if verbose && !document.fields.is_empty() {
                    println!("      Fields: {}", document.fields.join(", ").cyan());
                }
            }
            Err(e) => println!("      {} {}", "❌".red(), e.to_string().red()),
        }
    }
    println!();

    Ok(summaries)
}

/// Print a fatal error the way the run summary is printed
pub fn report_fatal(error: &ConvertError) {
    println!("\n{}", "--- ERROR ---".bold().red());
    println!("{}", error.to_string().red());
    if let Some(hint) = fatal_hint(error) {
        println!("{}", hint);
    }
    println!("{}", "-------------".bold().red());
}

fn fatal_hint(error: &ConvertError) -> Option<&'static str> {
    match error {
        ConvertError::WorkbookNotFound(_) => {
            Some("Check the input path, or pass the workbook as an argument.")
        }
        ConvertError::MalformedWorkbook { .. } => Some("Only .xlsx workbooks are supported."),
        ConvertError::Yaml(_) => Some("Config keys: input, output_dir, index_file_name, emit_index."),
        _ => None,
    }
}

fn summary_line(report: &ConversionReport) -> String {
    let written = report.outputs().count();
    let failed = report.failure_count();
    let verb = if report.dry_run {
        "would be written"
    } else {
        "written"
    };

    let mut line = format!(
        "{} {} {}",
        written,
        if written == 1 { "document" } else { "documents" },
        verb
    );
    if failed > 0 {
        line.push_str(&format!(", {} failed", failed));
    }
    if matches!(report.index, IndexOutcome::Failed(_)) {
        line.push_str(", index failed");
    }
    line
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
