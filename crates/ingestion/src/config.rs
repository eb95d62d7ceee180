//! Fixed layout of the auction site export.
//!
//! Column names, header markers and thresholds that describe the source
//! spreadsheet. Anything an operator may want to change per run lives in
//! [`crate::IngestOptions`] instead.

use serde::{Deserialize, Serialize};

/// Physical lines the spreadsheet export wraps the header across.
pub const HEADER_LINE_COUNT: usize = 3;

/// Header lines plus at least one data row.
pub const MIN_SOURCE_LINES: usize = HEADER_LINE_COUNT + 1;

/// Rows per progress report.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Sources above this size get a warning before processing.
pub const LARGE_SOURCE_BYTES: u64 = 10 * 1024 * 1024;

/// Characters of a rejected row echoed into the warning.
pub const ROW_PREVIEW_CHARS: usize = 100;

/// Placeholder the export uses for a missing coordinate.
pub const NOT_FOUND: &str = "Not Found";

/// Placeholder the export uses for a missing phone number or link.
pub const NOT_AVAILABLE: &str = "NA";

/// Maps query URL prefix; latitude and longitude are appended as `lat,lng`.
pub const MAPS_QUERY_PREFIX: &str = "https://www.google.com/maps?q=";

/// Short acronyms kept uppercase by the name normalizers.
pub const KNOWN_ACRONYMS: [&str; 6] = ["BSK", "BDA", "FE", "JP", "RMV", "MV"];

/// Substrings that identify header cells wrapped across two columns.
pub mod markers {
    /// Start of the coordinator contact column label
    pub const CONTACT_LABEL: &str = "Contact Number";
    /// Second half of the contact column label
    pub const CONTACT_CONTINUATION: &str = "9am-5pm";
    /// Start of the metric area column label
    pub const AREA_LABEL: &str = "Total Area";
    /// Unit suffix completing the metric area label
    pub const AREA_SUFFIX: &str = "(in Sqm)";
}

/// Logical column names after header reconciliation.
pub mod columns {
    pub const SL_NO: &str = "Sl_No";
    pub const SITE_SIZE: &str = "Site Size";
    pub const TYPE: &str = "Type";
    pub const LAYOUT: &str = "Layout";
    pub const LAYOUT_DETAILS: &str = "Layout Details";
    pub const SITE_NO: &str = "Site_No";
    pub const E_TO_W: &str = "E to W";
    pub const N_TO_S: &str = "N to S";
    pub const LAT: &str = "Lat";
    pub const LONG: &str = "Long";
    pub const SURVEY_NO: &str = "Survey.No.";
    pub const RATE_PER_SQ_MTR: &str = "Rate Per Sq.Mtr in Rs.";
    pub const GOOGLE_MAPS_LINK: &str = "Google Maps Link";

    /// The export has carried the area column under both spellings.
    pub const TOTAL_AREA: [&str; 2] = ["Total_Area (in sq.m)", "Total Area\n(in Sqm)"];

    /// Some exports leave a trailing space on this header.
    pub const SIZE_CLASSIFICATION: [&str; 2] = ["Size Classification", "Size Classification "];

    /// Columns that appear twice in the export; only the first is read.
    pub const FIRST_OCCURRENCE_ONLY: [&str; 2] = [LAT, LONG];
}

/// One way of locating the contact number in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactLookup {
    /// Field with exactly this name
    Exact(&'static str),
    /// First field (in column order) whose name contains this text
    Containing(&'static str),
}

/// Contact lookups in priority order.
pub const CONTACT_LOOKUPS: &[ContactLookup] = &[
    ContactLookup::Exact("Contact Number - Site Information Coordinator\n9am-5pm on working days"),
    ContactLookup::Exact("Contact Number - Site Information Coordinator"),
    ContactLookup::Exact(markers::CONTACT_LABEL),
    ContactLookup::Containing(markers::CONTACT_LABEL),
];

/// What to do with a row whose `Sl_No` does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialPolicy {
    /// Use the 1-based row position instead
    #[default]
    Lenient,
    /// Reject the row
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_lines_includes_one_data_row() {
        assert_eq!(MIN_SOURCE_LINES, 4);
    }

    #[test]
    fn test_contact_lookups_end_with_scan() {
        assert!(matches!(
            CONTACT_LOOKUPS.last(),
            Some(ContactLookup::Containing(_))
        ));
    }

    #[test]
    fn test_acronyms_are_short_uppercase() {
        for acronym in KNOWN_ACRONYMS {
            assert!(acronym.len() <= 4);
            assert_eq!(acronym, acronym.to_uppercase());
        }
    }

    #[test]
    fn test_serial_policy_from_yaml_style_names() {
        let strict: SerialPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(strict, SerialPolicy::Strict);
        assert_eq!(SerialPolicy::default(), SerialPolicy::Lenient);
    }
}
