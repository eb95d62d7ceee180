//! Quote-aware CSV line splitting.
//!
//! A `"` toggles quoting and is itself dropped; commas inside quotes are kept.
//! Quotes are never escaped or unescaped.

use crate::error::RowError;

/// Cells of one tokenized data line.
pub type RawRow = Vec<String>;

struct Scan {
    fields: Vec<String>,
    in_quotes: bool,
}

fn scan(line: &str) -> Scan {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    Scan { fields, in_quotes }
}

/// Split a line into trimmed fields.
///
/// An unterminated quote is accepted: everything after it lands in the last
/// field. Used for the joined header, whose quoted cells span physical lines.
pub fn tokenize_line(line: &str) -> Vec<String> {
    scan(line).fields
}

/// Split a data line, rejecting it if a quote is left open.
pub fn tokenize_row(line: &str) -> Result<RawRow, RowError> {
    let Scan { fields, in_quotes } = scan(line);
    if in_quotes {
        return Err(RowError::UnterminatedQuote);
    }
    Ok(fields)
}
