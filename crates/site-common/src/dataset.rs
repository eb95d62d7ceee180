//! The aggregate artifact written by the pipeline.

use serde::{Deserialize, Serialize};

use crate::site::{BiddingSession, SiteRecord};

/// Summary counts derived from `sites`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total: usize,
    pub with_coordinates: usize,
    pub session1: usize,
    pub session2: usize,
}

impl DatasetStats {
    /// Compute the counts for a slice of records.
    pub fn from_sites(sites: &[SiteRecord]) -> Self {
        sites.iter().fold(Self::default(), |mut stats, site| {
            stats.total += 1;
            if site.has_coordinates {
                stats.with_coordinates += 1;
            }
            match site.bidding_session {
                BiddingSession::First => stats.session1 += 1,
                BiddingSession::Second => stats.session2 += 1,
            }
            stats
        })
    }
}

/// Everything the UI layer reads: the sites plus their filter facets.
///
/// Facet lists hold distinct non-empty values in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub sites: Vec<SiteRecord>,
    pub layouts: Vec<String>,
    pub layout_groups: Vec<String>,
    pub site_sizes: Vec<String>,
    pub types: Vec<String>,
    pub size_classifications: Vec<String>,
    pub stats: DatasetStats,
}

impl Dataset {
    /// Look up a site by serial number.
    pub fn site(&self, sl_no: u32) -> Option<&SiteRecord> {
        self.sites.iter().find(|s| s.sl_no == sl_no)
    }

    /// Sites belonging to one bidding session, in source order.
    pub fn sites_in_session(
        &self,
        session: BiddingSession,
    ) -> impl Iterator<Item = &SiteRecord> + '_ {
        self.sites
            .iter()
            .filter(move |s| s.bidding_session == session)
    }
}
