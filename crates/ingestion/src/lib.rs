//! Auction site data ingestion library.
//!
//! Turns the land auction's spreadsheet export (a CSV whose header is wrapped
//! across several physical lines) into the JSON dataset the website reads.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! - [`tokenizer`]: quote-aware line splitting
//! - [`header`]: merging the wrapped header into logical columns
//! - [`extract`]: row cells → name/value map
//! - [`normalize`]: coordinates, phone numbers, links, name casing
//! - [`record`]: one [`SiteRecord`](site_common::SiteRecord) per row
//! - [`aggregate`]: facets and counts
//! - [`writer`]: the JSON artifact
//!
//! [`Ingester`] drives the whole thing. A malformed row is skipped with a
//! warning; a missing or unreadable source or an unwritable output is fatal.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod header;
mod ingester;
pub mod normalize;
pub mod record;
pub mod tokenizer;
pub mod writer;

// Re-exports
pub use aggregate::DatasetBuilder;
pub use config::{ContactLookup, SerialPolicy};
pub use error::{IngestionError, Result, RowError};
pub use header::{reconcile_headers, HeaderMap};
pub use ingester::{
    process_row, IngestOptions, IngestionReport, IngestionResult, Ingester, SkippedRow,
};
pub use normalize::{normalize_layout_name, to_title_case};
pub use writer::write_dataset;
