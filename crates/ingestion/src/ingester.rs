//! Main Ingester struct driving the CSV → dataset pipeline.

use std::path::{Path, PathBuf};

use site_common::Dataset;
use tracing::{debug, info, warn};

use crate::aggregate::DatasetBuilder;
use crate::config::{
    SerialPolicy, DEFAULT_BATCH_SIZE, HEADER_LINE_COUNT, LARGE_SOURCE_BYTES, MIN_SOURCE_LINES,
    ROW_PREVIEW_CHARS,
};
use crate::error::{IngestionError, Result, RowError};
use crate::extract::extract_fields;
use crate::header::{reconcile_headers, HeaderMap};
use crate::record::{assemble_record, AssembledRecord};
use crate::tokenizer::tokenize_row;
use crate::writer::write_dataset;

/// Options for ingestion operations.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Handling of unparsable `Sl_No` cells
    pub serial_policy: SerialPolicy,
    /// Rows per progress report
    pub batch_size: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            serial_policy: SerialPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl IngestOptions {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(IngestionError::InvalidConfig(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// A data row that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub error: RowError,
    /// Start of the raw line, for the operator
    pub preview: String,
}

/// What happened to the data rows during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// Non-blank data rows seen
    pub rows_seen: usize,
    /// Blank data lines ignored
    pub blank_lines: usize,
    /// Rows that became records
    pub rows_ingested: usize,
    /// Rows rejected with a per-row error
    pub skipped: Vec<SkippedRow>,
    /// Source lines whose serial number fell back to the row position
    pub serial_fallbacks: Vec<usize>,
}

/// Result of an ingestion operation.
#[derive(Debug, Clone)]
pub struct IngestionResult {
    pub dataset: Dataset,
    pub report: IngestionReport,
}

/// Core ingester for the auction site export.
///
/// Reads the source once, processes rows strictly in order and folds them
/// into a [`Dataset`]. Environment problems are fatal; a bad row is only
/// skipped.
pub struct Ingester {
    options: IngestOptions,
}

impl Ingester {
    /// Create a new Ingester.
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    /// Ingest a source file and write the artifact to `output`.
    pub fn ingest_to_file(&self, source: &Path, output: &Path) -> Result<IngestionResult> {
        let result = self.ingest_file(source)?;
        let bytes = write_dataset(&result.dataset, output)?;
        info!(
            output = %output.display(),
            bytes,
            sites = result.dataset.stats.total,
            "Dataset written"
        );
        Ok(result)
    }

    /// Ingest a source file from the filesystem.
    pub fn ingest_file(&self, source: &Path) -> Result<IngestionResult> {
        let content = read_source(source)?;
        self.ingest_str(&content, source)
    }

    /// Ingest CSV text. `source` is only used in messages.
    pub fn ingest_str(&self, content: &str, source: &Path) -> Result<IngestionResult> {
        self.options.validate()?;

        let content = content.trim();
        if content.is_empty() {
            return Err(IngestionError::EmptySource(source.to_path_buf()));
        }

        let lines: Vec<&str> = content.lines().collect();
        if lines.len() < MIN_SOURCE_LINES {
            return Err(IngestionError::TooFewLines {
                found: lines.len(),
                expected: MIN_SOURCE_LINES,
            });
        }

        let headers = reconcile_headers(&lines[..HEADER_LINE_COUNT])?;
        let data_rows = &lines[HEADER_LINE_COUNT..];
        let batch_size = self.options.batch_size;
        let total_batches = data_rows.len().div_ceil(batch_size);

        info!(
            source = %source.display(),
            columns = headers.len(),
            rows = data_rows.len(),
            batch_size,
            "Processing data rows"
        );

        let mut builder = DatasetBuilder::new();
        let mut report = IngestionReport::default();

        for (batch_index, batch) in data_rows.chunks(batch_size).enumerate() {
            for (offset, line) in batch.iter().enumerate() {
                let row_index = batch_index * batch_size + offset;
                self.ingest_row(line, row_index, &headers, &mut builder, &mut report);
            }

            let done = (batch_index * batch_size + batch.len()).min(data_rows.len());
            debug!(
                batch = batch_index + 1,
                total_batches,
                rows = done,
                percent = %format!("{:.1}", done as f64 * 100.0 / data_rows.len() as f64),
                "Batch completed"
            );
        }

        let dataset = builder.finish();
        info!(
            sites = dataset.stats.total,
            layouts = dataset.layouts.len(),
            with_coordinates = dataset.stats.with_coordinates,
            skipped = report.skipped.len(),
            "Processing complete"
        );

        Ok(IngestionResult { dataset, report })
    }

    fn ingest_row(
        &self,
        line: &str,
        row_index: usize,
        headers: &HeaderMap,
        builder: &mut DatasetBuilder,
        report: &mut IngestionReport,
    ) {
        if line.trim().is_empty() {
            report.blank_lines += 1;
            return;
        }
        report.rows_seen += 1;
        let line_number = row_index + HEADER_LINE_COUNT + 1;

        match process_row(line, row_index, headers, self.options.serial_policy) {
            Ok(AssembledRecord { record, serial }) => {
                if serial.is_fallback() {
                    warn!(
                        line = line_number,
                        sl_no = record.sl_no,
                        "Unparsable serial number, using row position"
                    );
                    report.serial_fallbacks.push(line_number);
                }
                builder.push(record);
                report.rows_ingested += 1;
            }
            Err(error) => {
                let preview: String = line.chars().take(ROW_PREVIEW_CHARS).collect();
                warn!(
                    line = line_number,
                    error = %error,
                    row = %preview,
                    "Skipping malformed row"
                );
                report.skipped.push(SkippedRow {
                    line: line_number,
                    error,
                    preview,
                });
            }
        }
    }
}

impl Default for Ingester {
    fn default() -> Self {
        Self::new(IngestOptions::default())
    }
}

/// Turn one data line into a record.
pub fn process_row(
    line: &str,
    row_index: usize,
    headers: &HeaderMap,
    policy: SerialPolicy,
) -> std::result::Result<AssembledRecord, RowError> {
    let raw = tokenize_row(line)?;
    let fields = extract_fields(headers, &raw);
    assemble_record(&fields, row_index, policy)
}

/// Read the whole source file, failing on anything but a readable file.
fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(IngestionError::SourceNotFound(path.to_path_buf()));
    }

    let read_err = |source| IngestionError::SourceRead {
        path: PathBuf::from(path),
        source,
    };
    let size = std::fs::metadata(path).map_err(read_err)?.len();
    if size > LARGE_SOURCE_BYTES {
        warn!(
            path = %path.display(),
            size_mb = %format!("{:.2}", size as f64 / (1024.0 * 1024.0)),
            "Source file is large, processing may take longer"
        );
    }

    std::fs::read_to_string(path).map_err(read_err)
}
