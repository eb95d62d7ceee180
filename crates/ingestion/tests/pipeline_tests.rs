//! End-to-end tests for the CSV → dataset pipeline.

use std::path::Path;

use ingestion::{reconcile_headers, IngestOptions, Ingester, IngestionError, RowError};
use site_common::{BiddingSession, Dataset};
use test_utils::{
    coords, export_csv, export_csv_with_lines, generate_rows, header,
    require_test_file, split_header, temp_test_dir, write_source, SiteRow,
};

fn ingest(csv: &str) -> ingestion::IngestionResult {
    Ingester::default()
        .ingest_str(csv, Path::new("sites-new.csv"))
        .expect("ingestion should succeed")
}

// ============================================================================
// Header reconciliation
// ============================================================================

#[test]
fn test_export_header_reconciles() {
    let headers = reconcile_headers(&header::LINES).unwrap();

    assert_eq!(headers.len(), header::COLUMN_COUNT);
    assert_eq!(headers.names().iter().filter(|n| n.as_str() == header::CONTACT_COLUMN).count(), 1);
    assert_eq!(headers.names().iter().filter(|n| n.as_str() == header::AREA_COLUMN).count(), 1);
}

#[test]
fn test_split_header_merges_and_drops_fragments() {
    let headers = reconcile_headers(&split_header::LINES).unwrap();

    assert_eq!(
        headers.names(),
        &[
            "Sl_No",
            "Layout",
            header::CONTACT_COLUMN,
            header::AREA_COLUMN,
            "Rate Per Sq.Mtr in Rs.",
        ]
    );
    assert!(!headers.iter().any(|n| n == "9am-5pm on working days" || n == "(in Sqm)"));
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_two_rows_one_located() {
    let csv = export_csv(&[SiteRow::new(1), SiteRow::new(2).without_coordinates()]);
    let dataset = ingest(&csv).dataset;

    assert_eq!(dataset.stats.total, 2);
    assert_eq!(dataset.stats.with_coordinates, 1);
    assert_eq!(dataset.sites[1].google_maps_link, "");
    assert_eq!(dataset.sites[1].lat, None);
    assert_eq!(dataset.sites[1].lng, None);

    let first = &dataset.sites[0];
    assert!(first.has_coordinates);
    assert_eq!(first.coordinates(), Some(coords::BENGALURU));
    assert_eq!(
        first.google_maps_link,
        "https://www.google.com/maps?q=12.9716,77.5946"
    );
}

#[test]
fn test_record_fields_mapped_from_columns() {
    let csv = export_csv(&[SiteRow::new(7).with_maps_link("https://maps.app.goo.gl/abc")]);
    let site = &ingest(&csv).dataset.sites[0];

    assert_eq!(site.sl_no, 7);
    assert_eq!(site.site_size, "9x12");
    assert_eq!(site.site_type, "Intermediate");
    assert_eq!(site.layout, "Kumaraswamy Layout, 2nd Block");
    assert_eq!(site.layout_group, "Kumaraswamy Layout");
    assert_eq!(site.layout_details, "Near BDA Complex");
    assert_eq!(site.site_no, "107");
    assert_eq!(site.e_to_w, "9");
    assert_eq!(site.n_to_s, "12");
    assert_eq!(site.total_area, "108");
    assert_eq!(site.size_classification, "Small");
    assert_eq!(site.survey_no, "12/3");
    assert_eq!(site.contact_number, "9876543210");
    assert_eq!(site.rate_per_sq_mtr, "85000");
    assert_eq!(site.google_maps_link, "https://maps.app.goo.gl/abc");
    assert_eq!(site.bidding_session, BiddingSession::First);
}

#[test]
fn test_duplicate_coordinate_columns_use_first() {
    // The generator fills the second Lat/Long pair with zeros
    let csv = export_csv(&[SiteRow::new(1).with_coordinates("13.01", "77.61")]);
    let site = &ingest(&csv).dataset.sites[0];
    assert_eq!(site.lat, Some(13.01));
    assert_eq!(site.lng, Some(77.61));
}

#[test]
fn test_out_of_range_coordinates_dropped() {
    let (lat, lng) = coords::INVALID_LAT;
    let csv = export_csv(&[SiteRow::new(1).with_coordinates(&lat.to_string(), &lng.to_string())]);
    let site = &ingest(&csv).dataset.sites[0];
    assert_eq!(site.lat, None);
    assert_eq!(site.lng, Some(77.5));
    assert!(!site.has_coordinates);
}

#[test]
fn test_na_contact_is_empty() {
    let csv = export_csv(&[SiteRow::new(1).with_contact("NA")]);
    assert_eq!(ingest(&csv).dataset.sites[0].contact_number, "");
}

#[test]
fn test_sessions_split_at_42() {
    let dataset = ingest(&export_csv(&generate_rows(50))).dataset;

    assert_eq!(dataset.stats.session1, 42);
    assert_eq!(dataset.stats.session2, 8);
    assert_eq!(dataset.stats.with_coordinates, 25);
    assert_eq!(dataset.sites_in_session(BiddingSession::Second).next().map(|s| s.sl_no), Some(43));
}

#[test]
fn test_facets() {
    let dataset = ingest(&export_csv(&generate_rows(6))).dataset;

    assert_eq!(
        dataset.layout_groups,
        vec!["Arkavathy Layout", "Banashankari 6th Stage", "Kumaraswamy Layout"]
    );
    assert_eq!(dataset.layouts.len(), 3);
    assert_eq!(dataset.site_sizes, vec!["9x12"]);
    assert_eq!(dataset.types, vec!["Intermediate"]);
    assert_eq!(dataset.size_classifications, vec!["Small"]);
}

// ============================================================================
// Partial failure
// ============================================================================

#[test]
fn test_malformed_row_between_valid_rows() {
    let lines = vec![
        SiteRow::new(1).to_csv_line(),
        "2,9x12,\"Intermediate,broken".to_string(),
        SiteRow::new(3).to_csv_line(),
    ];
    let result = ingest(&export_csv_with_lines(&lines));

    let serials: Vec<_> = result.dataset.sites.iter().map(|s| s.sl_no).collect();
    assert_eq!(serials, vec![1, 3]);
    assert_eq!(result.dataset.sites.len(), lines.len() - 1);
    assert_eq!(result.report.rows_seen, 3);
    assert_eq!(result.report.rows_ingested, 2);
    assert_eq!(result.report.skipped.len(), 1);
    assert_eq!(result.report.skipped[0].line, 5);
    assert_eq!(result.report.skipped[0].error, RowError::UnterminatedQuote);
}

#[test]
fn test_lenient_serial_fallback_uses_row_position() {
    let lines = vec![
        SiteRow::new(1).to_csv_line(),
        SiteRow::new(0).with_serial("n/a").to_csv_line(),
    ];
    let result = ingest(&export_csv_with_lines(&lines));

    assert_eq!(result.dataset.sites[1].sl_no, 2);
    assert_eq!(result.report.serial_fallbacks, vec![5]);
}

#[test]
fn test_strict_serials_reject_row() {
    let lines = vec![
        SiteRow::new(1).to_csv_line(),
        SiteRow::new(0).with_serial("n/a").to_csv_line(),
    ];
    let ingester = Ingester::new(IngestOptions {
        serial_policy: ingestion::SerialPolicy::Strict,
        ..Default::default()
    });
    let result = ingester
        .ingest_str(&export_csv_with_lines(&lines), Path::new("sites-new.csv"))
        .unwrap();

    assert_eq!(result.dataset.sites.len(), 1);
    assert_eq!(
        result.report.skipped[0].error,
        RowError::InvalidSerial("n/a".to_string())
    );
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_ingest_to_file_writes_artifact() {
    let dir = temp_test_dir();
    let source = write_source(dir.path(), "sites-new.csv", &export_csv(&generate_rows(3)));
    let output = dir.path().join("src").join("data").join("sites.json");

    let result = Ingester::default().ingest_to_file(&source, &output).unwrap();

    let written: Dataset = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, result.dataset);
    assert_eq!(written.stats.total, 3);
}

#[test]
fn test_artifact_json_shape() {
    let dir = temp_test_dir();
    let source = write_source(dir.path(), "sites-new.csv", &export_csv(&[SiteRow::new(1)]));
    let output = dir.path().join("sites.json");
    Ingester::default().ingest_to_file(&source, &output).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    for key in ["sites", "layouts", "siteSizes", "types", "stats"] {
        assert!(json.get(key).is_some(), "missing top-level key {}", key);
    }
    assert_eq!(json["stats"]["withCoordinates"], 1);
    assert_eq!(json["sites"][0]["biddingSession"], 1);
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = temp_test_dir();
    let err = Ingester::default()
        .ingest_to_file(&dir.path().join("missing.csv"), &dir.path().join("out.json"))
        .unwrap_err();

    assert!(matches!(err, IngestionError::SourceNotFound(_)));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_header_only_source_is_fatal() {
    let dir = temp_test_dir();
    let source = write_source(dir.path(), "sites-new.csv", &header::LINES.join("\n"));
    let err = Ingester::default().ingest_file(&source).unwrap_err();
    assert!(matches!(err, IngestionError::TooFewLines { found: 3, .. }));
}

#[test]
fn test_real_export_if_present() {
    let path = require_test_file!("sites-new.csv");
    let result = Ingester::default().ingest_file(&path).unwrap();

    assert!(result.dataset.stats.total > 0);
    assert_eq!(
        result.dataset.stats.session1 + result.dataset.stats.session2,
        result.dataset.stats.total
    );
}
