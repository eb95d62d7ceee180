//! Mapping of raw row cells onto logical column names.

use crate::config::columns::FIRST_OCCURRENCE_ONLY;
use crate::header::HeaderMap;

/// Name→value map for one row, in column order.
///
/// Re-inserting an existing name replaces the value in place, so iteration
/// order is the order names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name`, or `""` when the column is missing.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// First non-empty value among several spellings of one column.
    pub fn first_text(&self, names: &[&str]) -> &str {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign each row cell to its header name.
///
/// Missing trailing cells become `""`; extra cells are ignored. For the
/// duplicated coordinate columns the first occurrence wins. Any other
/// duplicated name is overwritten by its last occurrence.
pub fn extract_fields(headers: &HeaderMap, raw: &[String]) -> FieldMap {
    let mut fields = FieldMap::with_capacity(headers.len());

    for (index, name) in headers.iter().enumerate() {
        if FIRST_OCCURRENCE_ONLY.contains(&name) && fields.contains(name) {
            continue;
        }
        let value = raw.get(index).map(String::as_str).unwrap_or("");
        fields.insert(name, value);
    }

    fields
}
