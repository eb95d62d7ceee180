//! Assembly of one [`SiteRecord`] from a row's field map.

use site_common::{BiddingSession, SiteRecord};

use crate::config::{columns, ContactLookup, SerialPolicy, CONTACT_LOOKUPS};
use crate::error::RowError;
use crate::extract::FieldMap;
use crate::normalize::{
    format_phone, google_maps_link, normalize_layout_name, parse_coordinate, to_title_case,
    CoordinateAxis,
};

/// Where a record's serial number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialSource {
    /// Parsed from the `Sl_No` column
    Parsed(u32),
    /// `Sl_No` was unusable; the 1-based row position was used
    RowPosition(u32),
}

impl SerialSource {
    pub fn value(self) -> u32 {
        match self {
            SerialSource::Parsed(n) | SerialSource::RowPosition(n) => n,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, SerialSource::RowPosition(_))
    }
}

/// A record plus how its serial number was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRecord {
    pub record: SiteRecord,
    pub serial: SerialSource,
}

/// Leading-digit parse of a serial cell. Zero counts as unparsable.
fn parse_serial(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse::<u32>().ok().filter(|&n| n > 0)
}

/// Resolve the serial number for the row at `row_index` (0-based).
pub fn resolve_serial(
    raw: &str,
    row_index: usize,
    policy: SerialPolicy,
) -> Result<SerialSource, RowError> {
    if let Some(n) = parse_serial(raw) {
        return Ok(SerialSource::Parsed(n));
    }
    match policy {
        SerialPolicy::Lenient => Ok(SerialSource::RowPosition(row_index as u32 + 1)),
        SerialPolicy::Strict => Err(RowError::InvalidSerial(raw.trim().to_string())),
    }
}

impl ContactLookup {
    /// Apply this lookup to a row. Empty and `NA` values count as absent.
    pub fn resolve(&self, fields: &FieldMap) -> Option<String> {
        match *self {
            ContactLookup::Exact(name) => fields.get(name).and_then(format_phone),
            ContactLookup::Containing(needle) => fields
                .iter()
                .filter(|(name, _)| name.contains(needle))
                .find_map(|(_, value)| format_phone(value)),
        }
    }
}

/// First contact number found by `lookups`, in order; `""` if none.
pub fn resolve_contact(fields: &FieldMap, lookups: &[ContactLookup]) -> String {
    lookups
        .iter()
        .find_map(|lookup| lookup.resolve(fields))
        .unwrap_or_default()
}

/// Build the record for one row.
pub fn assemble_record(
    fields: &FieldMap,
    row_index: usize,
    policy: SerialPolicy,
) -> Result<AssembledRecord, RowError> {
    let serial = resolve_serial(fields.text(columns::SL_NO), row_index, policy)?;

    let lat = parse_coordinate(fields.text(columns::LAT), CoordinateAxis::Latitude);
    let lng = parse_coordinate(fields.text(columns::LONG), CoordinateAxis::Longitude);
    let layout = fields.text(columns::LAYOUT).to_string();

    let record = SiteRecord {
        sl_no: serial.value(),
        site_size: fields.text(columns::SITE_SIZE).to_string(),
        site_type: fields.text(columns::TYPE).to_string(),
        layout_group: normalize_layout_name(&layout),
        layout_display_name: to_title_case(&layout),
        layout,
        layout_details: fields.text(columns::LAYOUT_DETAILS).to_string(),
        site_no: fields.text(columns::SITE_NO).to_string(),
        e_to_w: fields.text(columns::E_TO_W).to_string(),
        n_to_s: fields.text(columns::N_TO_S).to_string(),
        total_area: fields.first_text(&columns::TOTAL_AREA).to_string(),
        size_classification: fields.first_text(&columns::SIZE_CLASSIFICATION).to_string(),
        lat,
        lng,
        has_coordinates: lat.is_some() && lng.is_some(),
        bidding_session: BiddingSession::for_serial(serial.value()),
        survey_no: fields.text(columns::SURVEY_NO).to_string(),
        contact_number: resolve_contact(fields, CONTACT_LOOKUPS),
        rate_per_sq_mtr: fields.text(columns::RATE_PER_SQ_MTR).to_string(),
        google_maps_link: google_maps_link(lat, lng, fields.text(columns::GOOGLE_MAPS_LINK)),
    };

    Ok(AssembledRecord { record, serial })
}
