//! Pure value normalizers applied while assembling records.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::{KNOWN_ACRONYMS, MAPS_QUERY_PREFIX, NOT_AVAILABLE, NOT_FOUND};

static MISSPELLING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)BANASHNKARI").unwrap());
const MISSPELLING_FIX: &str = "BANASHANKARI";

static SPLIT_ORDINAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+(ND|ST|RD|TH)\b").unwrap());
static INITIALS_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]\.[A-Za-z]\.)([A-Z][a-z]+)").unwrap());
static INITIALS_OF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([A-Za-z]\.[A-Za-z]\.\s*)OF\b").unwrap());
static SINGLE_INITIAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]\.)([A-Z][a-z]+)").unwrap());
static INITIALS_ANY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]\.[A-Za-z]\.)([A-Za-z])").unwrap());
static ORDINAL_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d+(st|nd|rd|th)$").unwrap());
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());
static CORNER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*\(Corner\)\s*").unwrap());
static BLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+\d+(st|nd|rd|th)\s+block\s*").unwrap());

// ============================================================================
// Coordinates, phone numbers, links
// ============================================================================

/// Which coordinate a value is, and so which range it must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateAxis {
    Latitude,
    Longitude,
}

impl CoordinateAxis {
    pub fn max_abs(self) -> f64 {
        match self {
            CoordinateAxis::Latitude => 90.0,
            CoordinateAxis::Longitude => 180.0,
        }
    }
}

/// Parse one coordinate cell.
///
/// Returns `None` for an empty cell, the `Not Found` placeholder, anything
/// that is not a finite number, or a value outside the axis range.
pub fn parse_coordinate(raw: &str, axis: CoordinateAxis) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_FOUND {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= axis.max_abs())
}

/// Normalize a contact number. `None` when empty or `NA`; digits are kept as-is.
pub fn format_phone(raw: &str) -> Option<String> {
    let cleaned = raw.trim();
    if cleaned.is_empty() || cleaned == NOT_AVAILABLE {
        return None;
    }
    Some(cleaned.to_string())
}

/// Pick the maps link for a site.
///
/// The source link wins when present and not `NA`; otherwise a query URL is
/// built from the coordinates, if both are known.
pub fn google_maps_link(lat: Option<f64>, lng: Option<f64>, source: &str) -> String {
    let source = source.trim();
    if !source.is_empty() && source != NOT_AVAILABLE {
        return source.to_string();
    }
    match (lat, lng) {
        (Some(lat), Some(lng)) => format!("{}{},{}", MAPS_QUERY_PREFIX, lat, lng),
        _ => String::new(),
    }
}

// ============================================================================
// Name casing
// ============================================================================

fn fix_misspelling(s: &str) -> String {
    MISSPELLING_PATTERN.replace_all(s, MISSPELLING_FIX).into_owned()
}

/// Rebuild a period-separated initials token (`f.e.` → `F.E.`).
///
/// Returns `None` unless every non-empty part is one or two ASCII letters.
fn initials(word: &str) -> Option<String> {
    if !word.contains('.') {
        return None;
    }
    let parts: Vec<&str> = word.split('.').filter(|p| !p.is_empty()).collect();
    let is_initials = !parts.is_empty()
        && parts
            .iter()
            .all(|p| p.len() <= 2 && p.chars().all(|c| c.is_ascii_alphabetic()));
    if !is_initials {
        return None;
    }

    let mut rebuilt = parts
        .iter()
        .map(|p| p.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(".");
    if word.ends_with('.') && !rebuilt.ends_with('.') {
        rebuilt.push('.');
    }
    Some(rebuilt)
}

fn is_known_acronym(word: &str) -> bool {
    word.len() <= 4
        && !word.contains('.')
        && KNOWN_ACRONYMS.contains(&word.to_uppercase().as_str())
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Case a single whitespace-free token.
fn case_word(word: &str) -> String {
    if ORDINAL_WORD_PATTERN.is_match(word) {
        return word.to_lowercase();
    }
    if let Some(rebuilt) = initials(word) {
        return rebuilt;
    }
    if is_known_acronym(word) {
        return word.to_uppercase();
    }
    capitalize(word)
}

/// Put a space after each `X.Y.` pair glued to the next letter.
///
/// A match consumes the following letter, so chained pairs (`A.B.C.D.Efg`)
/// need repeated passes until nothing changes.
fn space_initials(s: &str) -> String {
    let mut current = s.to_string();
    loop {
        let next = INITIALS_ANY_PATTERN
            .replace_all(&current, |caps: &Captures| {
                format!("{} {}", caps[1].to_uppercase(), &caps[2])
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Title-case a place name.
///
/// `KUMARASWAMY 2 ND STAGE` → `Kumaraswamy 2nd Stage`,
/// `F.E.OF MATADAHALLI` → `F.E. Of Matadahalli`. Whitespace between words is
/// kept as-is.
pub fn to_title_case(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let s = fix_misspelling(s);
    let s = SPLIT_ORDINAL_PATTERN.replace_all(&s, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].to_lowercase())
    });
    let s = INITIALS_WORD_PATTERN.replace_all(&s, |caps: &Captures| {
        format!("{} {}", caps[1].to_uppercase(), &caps[2])
    });
    let s = INITIALS_OF_PATTERN.replace_all(&s, |caps: &Captures| {
        format!("{}Of", caps[1].to_uppercase())
    });
    let s = SINGLE_INITIAL_PATTERN.replace_all(&s, "${1} ${2}");

    WORD_PATTERN
        .replace_all(&s, |caps: &Captures| case_word(&caps[0]))
        .into_owned()
}

/// Split into plain and parenthesized segments, trimming each.
fn paren_segments(s: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        match ch {
            '(' => {
                if !current.trim().is_empty() {
                    segments.push(current.trim().to_string());
                }
                current.clear();
                current.push(ch);
            }
            ')' => {
                current.push(ch);
                segments.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        segments.push(current.trim().to_string());
    }

    segments
}

/// Reduce a layout label to the group name used by the layout filter.
///
/// Keeps the text before the first comma, drops the `(Corner)` marker and
/// block numbers, then title-cases everything outside parentheses.
/// `Kumaraswamy Layout, 2nd Block` and `KUMARASWAMY LAYOUT 5th Block` both
/// become `Kumaraswamy Layout`.
pub fn normalize_layout_name(layout: &str) -> String {
    if layout.is_empty() {
        return String::new();
    }

    let fixed = fix_misspelling(layout);
    let base = fixed.split(',').next().unwrap_or("").trim();
    let base = CORNER_PATTERN.replace_all(base, " ");
    let base = BLOCK_PATTERN.replace_all(base.trim(), " ");
    let base = space_initials(base.trim());

    paren_segments(&base)
        .into_iter()
        .map(|segment| {
            if segment.starts_with('(') && segment.ends_with(')') {
                segment
            } else {
                segment
                    .split_whitespace()
                    .map(case_word)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("12.9716", CoordinateAxis::Latitude), Some(12.9716));
        assert_eq!(parse_coordinate(" 77.5946 ", CoordinateAxis::Longitude), Some(77.5946));
        assert_eq!(parse_coordinate("Not Found", CoordinateAxis::Latitude), None);
        assert_eq!(parse_coordinate("", CoordinateAxis::Latitude), None);
        assert_eq!(parse_coordinate("200", CoordinateAxis::Latitude), None);
        assert_eq!(parse_coordinate("200", CoordinateAxis::Longitude), None);
        assert_eq!(parse_coordinate("abc", CoordinateAxis::Longitude), None);
        assert_eq!(parse_coordinate("NaN", CoordinateAxis::Latitude), None);
        assert_eq!(parse_coordinate("inf", CoordinateAxis::Longitude), None);
    }

    #[test]
    fn test_coordinate_range_is_per_axis() {
        assert_eq!(parse_coordinate("120.5", CoordinateAxis::Latitude), None);
        assert_eq!(parse_coordinate("120.5", CoordinateAxis::Longitude), Some(120.5));
        assert_eq!(parse_coordinate("-90", CoordinateAxis::Latitude), Some(-90.0));
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone(""), None);
        assert_eq!(format_phone("NA"), None);
        assert_eq!(format_phone(" 9876543210 "), Some("9876543210".to_string()));
        assert_eq!(format_phone("080-2345 6789"), Some("080-2345 6789".to_string()));
    }

    #[test]
    fn test_google_maps_link() {
        assert_eq!(
            google_maps_link(Some(1.0), Some(2.0), "https://maps.app.goo.gl/x"),
            "https://maps.app.goo.gl/x"
        );
        assert_eq!(
            google_maps_link(Some(12.9716), Some(77.5946), "NA"),
            "https://www.google.com/maps?q=12.9716,77.5946"
        );
        assert_eq!(google_maps_link(Some(12.9716), None, ""), "");
        assert_eq!(google_maps_link(None, None, ""), "");
    }

    #[test]
    fn test_title_case_ordinals() {
        assert_eq!(to_title_case("KUMARASWAMY 2 ND STAGE"), "Kumaraswamy 2nd Stage");
        assert_eq!(to_title_case("BANASHANKARI 6TH STAGE"), "Banashankari 6th Stage");
    }

    #[test]
    fn test_title_case_initials() {
        assert_eq!(to_title_case("F.E.Matadahalli"), "F.E. Matadahalli");
        assert_eq!(to_title_case("F.E.OF MATADAHALLI"), "F.E. Of Matadahalli");
        assert_eq!(to_title_case("r.t. nagar"), "R.T. Nagar");
        assert_eq!(to_title_case("J.Nagar"), "J. Nagar");
    }

    #[test]
    fn test_title_case_acronyms_and_typo() {
        assert_eq!(to_title_case("bsk 3rd stage"), "BSK 3rd Stage");
        assert_eq!(to_title_case("BANASHNKARI LAYOUT"), "Banashankari Layout");
        assert_eq!(to_title_case("RMV EXTENSION"), "RMV Extension");
        assert_eq!(to_title_case("BDAS LAYOUT"), "Bdas Layout");
    }

    #[test]
    fn test_title_case_idempotent() {
        for input in [
            "KUMARASWAMY 2 ND STAGE",
            "F.E.OF MATADAHALLI",
            "bsk 3rd stage, 2nd block",
            "Arkavathy Layout (Corner)",
            "J.P. NAGAR 9TH PHASE",
        ] {
            let once = to_title_case(input);
            assert_eq!(to_title_case(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_title_case_only_first_char_uppercased() {
        assert_eq!(to_title_case("ARKAVATHY (CORNER)"), "Arkavathy (corner)");
        assert_eq!(to_title_case("-EAST SIDE"), "-east Side");
        assert_eq!(to_title_case("\"QUOTED\" NAME"), "\"quoted\" Name");
    }

    #[test]
    fn test_title_case_empty() {
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_layout_groups_blocks_together() {
        assert_eq!(
            normalize_layout_name("Kumaraswamy Layout, 2nd Block"),
            normalize_layout_name("Kumaraswamy Layout, 5th Block")
        );
        assert_eq!(normalize_layout_name("KUMARASWAMY LAYOUT 5th Block"), "Kumaraswamy Layout");
    }

    #[test]
    fn test_layout_strips_corner() {
        assert_eq!(
            normalize_layout_name("Arkavathy Layout (Corner), Block 3"),
            "Arkavathy Layout"
        );
        assert_eq!(
            normalize_layout_name("Arkavathy (corner) Layout"),
            "Arkavathy Layout"
        );
    }

    #[test]
    fn test_layout_keeps_parenthesized_text() {
        assert_eq!(
            normalize_layout_name("HSR LAYOUT (Sector 7 extn)"),
            "Hsr Layout (Sector 7 extn)"
        );
    }

    #[test]
    fn test_layout_initials_and_typo() {
        assert_eq!(normalize_layout_name("f.e.matadahalli"), "F.E. Matadahalli");
        assert_eq!(
            normalize_layout_name("BANASHNKARI 6TH STAGE, 1st Block"),
            "Banashankari 6th Stage"
        );
        assert_eq!(normalize_layout_name("bda layout"), "BDA Layout");
    }

    #[test]
    fn test_layout_chained_initials() {
        assert_eq!(normalize_layout_name("A.B.C.D.Efg"), "A.B. C.D. Efg");
        assert_eq!(normalize_layout_name("r.t.nagar"), "R.T. Nagar");
    }

    #[test]
    fn test_layout_empty() {
        assert_eq!(normalize_layout_name(""), "");
        assert_eq!(normalize_layout_name(", 2nd Block"), "");
    }
}
