//! First-column title extraction from uploaded CSV exports.
//!
//! The import format is a spreadsheet export whose first column holds shop
//! names under a `タイトル` header. Only that column matters; the rest of each
//! row is ignored.

/// Extracts the first field of a single CSV line.
///
/// Handles a leading BOM, quoted fields, and doubled quotes inside quoted
/// fields. Returns `None` for an empty field.
#[must_use]
pub fn first_csv_field(line: &str) -> Option<String> {
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    if line.is_empty() {
        return None;
    }

    let mut in_quotes = false;
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => break,
            _ => field.push(ch),
        }
    }

    let mut field = field.trim();
    if field.starts_with('"') && field.ends_with('"') && field.len() >= 2 {
        field = field[1..field.len() - 1].trim();
    }
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Extracts unique shop titles from CSV text.
///
/// Skips the header row, drops blank lines and stray `タイトル` cells, and
/// de-duplicates while preserving first-seen order.
#[must_use]
pub fn parse_titles(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut titles: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for line in normalized.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(field) = first_csv_field(line) else {
            continue;
        };
        if field == "タイトル" {
            continue;
        }
        if seen.insert(field.clone()) {
            titles.push(field);
        }
    }

    titles
}
