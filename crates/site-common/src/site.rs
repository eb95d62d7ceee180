//! A single auctionable land parcel.

use serde::{Deserialize, Serialize};

/// Highest serial number auctioned in the first bidding session.
pub const LAST_SESSION_ONE_SERIAL: u32 = 42;

/// One of the two fixed auction rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BiddingSession {
    First,
    Second,
}

impl BiddingSession {
    /// Partition a serial number into its bidding session.
    pub fn for_serial(sl_no: u32) -> Self {
        if sl_no <= LAST_SESSION_ONE_SERIAL {
            BiddingSession::First
        } else {
            BiddingSession::Second
        }
    }

    pub fn number(self) -> u8 {
        match self {
            BiddingSession::First => 1,
            BiddingSession::Second => 2,
        }
    }
}

impl From<BiddingSession> for u8 {
    fn from(session: BiddingSession) -> Self {
        session.number()
    }
}

impl TryFrom<u8> for BiddingSession {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BiddingSession::First),
            2 => Ok(BiddingSession::Second),
            other => Err(format!("invalid bidding session: {}", other)),
        }
    }
}

/// Normalized record for one row of the source export.
///
/// Text fields are copied verbatim (trimmed) and are empty strings when the
/// source column is missing. `lat` and `lng` are `None` when absent or out of
/// range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub sl_no: u32,
    pub site_size: String,
    #[serde(rename = "type")]
    pub site_type: String,
    pub layout: String,
    /// Canonical layout name used for grouping in the layout filter
    pub layout_group: String,
    /// Title-cased layout label for display
    pub layout_display_name: String,
    pub layout_details: String,
    pub site_no: String,
    pub e_to_w: String,
    pub n_to_s: String,
    pub total_area: String,
    pub size_classification: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub has_coordinates: bool,
    pub bidding_session: BiddingSession,
    pub survey_no: String,
    pub contact_number: String,
    pub rate_per_sq_mtr: String,
    pub google_maps_link: String,
}

impl SiteRecord {
    /// Both coordinates, if the record has a usable location.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if !self.has_coordinates {
            return None;
        }
        self.lat.zip(self.lng)
    }
}
