//! Sheet → records conversion

use crate::error::SheetError;
use crate::naming::column_letter;
use crate::types::{Record, SheetDocument};
use calamine::{Data, ExcelDateTime, Range};
use chrono::{NaiveTime, Timelike};
use std::collections::HashSet;
use tracing::debug;

/// Convert a sheet's cell grid into records.
///
/// The first row of the used range names the fields. Every later row becomes
/// a record, unless one of its fields is blank, in which case it is counted in
/// `skipped` instead.
pub fn sheet_to_document(sheet_name: &str, range: &Range<Data>) -> Result<SheetDocument, SheetError> {
    let mut document = SheetDocument::new(sheet_name);

    // Absolute position of the used range, for A1 cell references
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(document); // Empty sheet
    };
    document.fields = header_fields(header, start_row, start_col)?;

    for (offset, row) in rows.enumerate() {
        // 1-based, and the header occupies the first row
        let row_number = start_row + offset + 2;
        let mut record = Record::new();
        let mut complete = true;

        for (col, field) in document.fields.iter().enumerate() {
            let cell = row.get(col).unwrap_or(&Data::Empty);
            let value = cell_text(cell).map_err(|error| SheetError::CellError {
                cell: cell_reference(start_col + col, row_number),
                error,
            })?;

            if value.trim().is_empty() {
                complete = false;
            }
            record.push(field.clone(), value);
        }

        if complete {
            document.records.push(record);
        } else {
            debug!(sheet = sheet_name, row = row_number, "skipping row with missing values");
            document.skipped += 1;
        }
    }

    Ok(document)
}

/// Read header cells into unique field names
fn header_fields(header: &[Data], start_row: usize, start_col: usize) -> Result<Vec<String>, SheetError> {
    let mut fields = Vec::with_capacity(header.len());
    let mut seen = HashSet::new();

    for (col, cell) in header.iter().enumerate() {
        let text = cell_text(cell).map_err(|error| SheetError::CellError {
            cell: cell_reference(start_col + col, start_row + 1),
            error,
        })?;

        let base = if text.trim().is_empty() {
            format!("col_{}", start_col + col)
        } else {
            text
        };

        // Repeated names get .1, .2, ... so JSON keys stay unique
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        fields.push(name);
    }

    Ok(fields)
}

/// Text form of a cell. Error cells yield their error code as `Err`.
pub fn cell_text(cell: &Data) -> Result<String, String> {
    match cell {
        Data::Empty => Ok(String::new()),
        Data::String(s) => Ok(s.clone()),
        Data::Int(i) => Ok(i.to_string()),
        // Shortest round-trip form: 3.0 → "3", 1.5 → "1.5"
        Data::Float(f) => Ok(f.to_string()),
        Data::Bool(b) => Ok(b.to_string()),
        Data::DateTime(dt) => Ok(datetime_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Ok(s.clone()),
        Data::Error(e) => Err(e.to_string()),
    }
}

fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_datetime() {
        if let Some(value) = dt.as_datetime() {
            let format = if value.time() == NaiveTime::MIN {
                "%Y-%m-%d"
            } else if value.nanosecond() != 0 {
                "%Y-%m-%dT%H:%M:%S%.f"
            } else {
                "%Y-%m-%dT%H:%M:%S"
            };
            return value.format(format).to_string();
        }
    }

    // Durations (and out-of-range dates) keep their serial value
    dt.as_f64().to_string()
}

fn cell_reference(col: usize, row_number: usize) -> String {
    format!("{}{}", column_letter(col), row_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTimeType};

    /// Build a range at `start` from row-major cell values
    fn grid(start: (u32, u32), rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new(start, (start.0 + height - 1, start.1 + width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((start.0 + r as u32, start.1 + c as u32), cell);
            }
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_basic_sheet() {
        let range = grid(
            (0, 0),
            vec![
                vec![s("word"), s("meaning")],
                vec![s("cat"), s("feline")],
                vec![s("dog"), s("canine")],
            ],
        );

        let doc = sheet_to_document("Common Words", &range).unwrap();
        assert_eq!(doc.fields, vec!["word", "meaning"]);
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.records[0].get("word"), Some("cat"));
        assert_eq!(doc.records[1].get("meaning"), Some("canine"));
        assert_eq!(doc.skipped, 0);
    }

    #[test]
    fn test_incomplete_rows_are_skipped() {
        let range = grid(
            (0, 0),
            vec![
                vec![s("english"), s("punjabi")],
                vec![s("house"), s("ਘਰ")],
                vec![s("water"), Data::Empty],
                vec![s("   "), s("ਪਾਣੀ")],
                vec![s("N/A"), s("N/A")],
            ],
        );

        let doc = sheet_to_document("Words", &range).unwrap();
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.skipped, 2);
        assert_eq!(doc.row_count(), 4);
        // "N/A" is an ordinary value
        assert_eq!(doc.records[1].get("english"), Some("N/A"));
    }

    #[test]
    fn test_empty_sheet() {
        let range: Range<Data> = Range::empty();
        let doc = sheet_to_document("Empty", &range).unwrap();
        assert!(doc.fields.is_empty());
        assert!(doc.records.is_empty());
    }

    #[test]
    fn test_header_only_sheet() {
        let range = grid((0, 0), vec![vec![s("word"), s("meaning")]]);
        let doc = sheet_to_document("Header", &range).unwrap();
        assert_eq!(doc.fields.len(), 2);
        assert!(doc.records.is_empty());
    }

    #[test]
    fn test_header_blank_and_duplicate_names() {
        let range = grid(
            (0, 0),
            vec![
                vec![s("a"), Data::Empty, s("a"), s("a"), Data::Float(2024.0)],
                vec![s("1"), s("2"), s("3"), s("4"), s("5")],
            ],
        );

        let doc = sheet_to_document("Dupes", &range).unwrap();
        assert_eq!(doc.fields, vec!["a", "col_1", "a.1", "a.2", "2024"]);
        assert_eq!(doc.records[0].len(), 5);
    }

    #[test]
    fn test_blank_header_named_after_absolute_column() {
        // Used range starting at B1: the blank header sits in column C (index 2)
        let range = grid(
            (0, 1),
            vec![vec![s("word"), Data::Empty], vec![s("cat"), s("feline")]],
        );

        let doc = sheet_to_document("Offset", &range).unwrap();
        assert_eq!(doc.fields, vec!["word", "col_2"]);
        assert_eq!(doc.records[0].get("col_2"), Some("feline"));
    }

    #[test]
    fn test_cell_text_scalars() {
        assert_eq!(cell_text(&Data::Empty).unwrap(), "");
        assert_eq!(cell_text(&Data::Int(42)).unwrap(), "42");
        assert_eq!(cell_text(&Data::Float(3.0)).unwrap(), "3");
        assert_eq!(cell_text(&Data::Float(1.5)).unwrap(), "1.5");
        assert_eq!(cell_text(&Data::Float(0.1)).unwrap(), "0.1");
        assert_eq!(cell_text(&Data::Bool(true)).unwrap(), "true");
        assert_eq!(
            cell_text(&Data::DateTimeIso("2024-01-31".to_string())).unwrap(),
            "2024-01-31"
        );
    }

    #[test]
    fn test_cell_text_datetimes() {
        let date = ExcelDateTime::new(45322.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(date)).unwrap(), "2024-01-31");

        let noon = ExcelDateTime::new(45322.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(noon)).unwrap(), "2024-01-31T12:00:00");

        // 12:30:45.5 keeps its half second
        let serial = 45322.0 + 45045.5 / 86400.0;
        let precise = ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_text(&Data::DateTime(precise)).unwrap(),
            "2024-01-31T12:30:45.500"
        );
    }

    #[test]
    fn test_cell_text_error() {
        let result = cell_text(&Data::Error(CellErrorType::Div0));
        assert_eq!(result, Err("#DIV/0!".to_string()));
    }

    #[test]
    fn test_error_cell_fails_sheet_with_reference() {
        // Used range starting at B3
        let range = grid(
            (2, 1),
            vec![
                vec![s("word"), s("count")],
                vec![s("cat"), Data::Int(1)],
                vec![s("dog"), Data::Error(CellErrorType::NA)],
            ],
        );

        let err = sheet_to_document("Broken", &range).unwrap_err();
        match err {
            SheetError::CellError { cell, error } => {
                assert_eq!(cell, "C5");
                assert_eq!(error, "#N/A");
            }
            other => panic!("Expected CellError, got {other:?}"),
        }
    }

    #[test]
    fn test_numbers_are_text() {
        let range = grid(
            (0, 0),
            vec![
                vec![s("name"), s("count"), s("ratio")],
                vec![s("x"), Data::Float(10.0), Data::Float(0.25)],
            ],
        );

        let doc = sheet_to_document("Numbers", &range).unwrap();
        let json = serde_json::to_string(&doc.records).unwrap();
        assert_eq!(json, r#"[{"name":"x","count":"10","ratio":"0.25"}]"#);
    }
}
