//! Multi-line header reconciliation.
//!
//! The export wraps two labels across a column boundary: the coordinator
//! contact label and the metric area label. Joining the physical header lines
//! and tokenizing once yields the raw cells; this module merges each wrapped
//! label back into a single logical column.

use tracing::debug;

use crate::config::markers::{AREA_LABEL, AREA_SUFFIX, CONTACT_CONTINUATION, CONTACT_LABEL};
use crate::config::HEADER_LINE_COUNT;
use crate::error::{IngestionError, Result};
use crate::tokenizer::tokenize_line;

/// Ordered logical column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    names: Vec<String>,
}

impl HeaderMap {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl From<Vec<String>> for HeaderMap {
    fn from(names: Vec<String>) -> Self {
        Self { names }
    }
}

fn is_area_label(cell: &str) -> bool {
    cell.contains(AREA_LABEL) && !cell.contains(AREA_SUFFIX)
}

fn is_continuation(cell: &str) -> bool {
    (cell.contains(AREA_SUFFIX) && !cell.contains(AREA_LABEL))
        || (cell.contains(CONTACT_CONTINUATION) && !cell.contains(CONTACT_LABEL))
}

/// Merge wrapped label cells into logical column names.
///
/// A label immediately followed by its continuation becomes one name joined
/// with `\n`. A continuation with no label before it is dropped.
pub fn merge_header_cells(cells: &[String]) -> HeaderMap {
    let mut names = Vec::with_capacity(cells.len());
    let mut i = 0;

    while i < cells.len() {
        let cell = cells[i].trim();
        let next = cells.get(i + 1).map(|s| s.trim());

        let continuation = if cell.contains(CONTACT_LABEL) {
            Some(CONTACT_CONTINUATION)
        } else if is_area_label(cell) {
            Some(AREA_SUFFIX)
        } else {
            None
        };

        match (continuation, next) {
            (Some(marker), Some(next)) if next.contains(marker) => {
                names.push(format!("{}\n{}", cell, next));
                i += 2;
                continue;
            }
            (Some(_), _) => names.push(cell.to_string()),
            (None, _) if is_continuation(cell) => {
                debug!(cell = %cell, index = i, "Dropping orphaned header continuation");
            }
            (None, _) => names.push(cell.to_string()),
        }
        i += 1;
    }

    HeaderMap { names }
}

/// Build the [`HeaderMap`] from the physical header lines.
///
/// Only the first [`HEADER_LINE_COUNT`] lines are used.
pub fn reconcile_headers(lines: &[&str]) -> Result<HeaderMap> {
    if lines.len() < HEADER_LINE_COUNT {
        return Err(IngestionError::TooFewHeaderLines {
            found: lines.len(),
            expected: HEADER_LINE_COUNT,
        });
    }

    let combined = lines[..HEADER_LINE_COUNT].join("\n");
    let cells = tokenize_line(&combined);
    if cells.iter().all(|c| c.is_empty()) {
        return Err(IngestionError::EmptyHeader);
    }

    let headers = merge_header_cells(&cells);
    debug!(
        raw_cells = cells.len(),
        columns = headers.len(),
        "Reconciled CSV header"
    );
    Ok(headers)
}
