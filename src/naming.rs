//! Output file naming - sheet name → filesystem-safe base name

/// Extension appended to every sheet document.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Sanitize a sheet name into a document base name.
///
/// Keeps letters, digits and spaces, trims the result, turns each remaining
/// space into `_` and lowercases everything:
///
/// ```
/// use sheetjson::naming::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("Common Words"), "common_words");
/// assert_eq!(sanitize_sheet_name("Verbs (Basic)"), "verbs_basic");
/// ```
///
/// May return an empty string when the name has no usable characters.
pub fn sanitize_sheet_name(sheet_name: &str) -> String {
    let kept: String = sheet_name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();

    kept.trim().replace(' ', "_").to_lowercase()
}

/// Full document file name for a base name (`common_words` → `common_words.json`)
pub fn document_file_name(base_name: &str) -> String {
    format!("{}.{}", base_name, DOCUMENT_EXTENSION)
}

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
pub fn column_letter(n: usize) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}
