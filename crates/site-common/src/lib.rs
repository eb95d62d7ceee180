//! Common types shared by the site ingestion pipeline and its consumers.
//!
//! The JSON artifact the pipeline writes is the only interface to the UI
//! layer, so the serde shape of these types is part of the public contract.

pub mod dataset;
pub mod site;

pub use dataset::{Dataset, DatasetStats};
pub use site::{BiddingSession, SiteRecord, LAST_SESSION_ONE_SERIAL};
