//! Builders for synthetic auction site exports.
//!
//! Rows are emitted in the column order of [`crate::fixtures::header`], so a
//! generated export reconciles to the same columns as the real one.

use crate::fixtures::header;

/// One data row of a synthetic export. Every cell is raw text.
#[derive(Debug, Clone)]
pub struct SiteRow {
    pub sl_no: String,
    pub site_size: String,
    pub site_type: String,
    pub layout: String,
    pub layout_details: String,
    pub site_no: String,
    pub e_to_w: String,
    pub n_to_s: String,
    pub total_area: String,
    pub size_classification: String,
    pub lat: String,
    pub lng: String,
    pub survey_no: String,
    pub maps_link: String,
    pub contact: String,
    pub rate: String,
}

impl SiteRow {
    /// A complete row with coordinates in Bengaluru.
    pub fn new(sl_no: u32) -> Self {
        let (lat, lng) = crate::fixtures::coords::BENGALURU;
        Self {
            sl_no: sl_no.to_string(),
            site_size: "9x12".to_string(),
            site_type: "Intermediate".to_string(),
            layout: "Kumaraswamy Layout, 2nd Block".to_string(),
            layout_details: "Near BDA Complex".to_string(),
            site_no: format!("{}", 100 + sl_no),
            e_to_w: "9".to_string(),
            n_to_s: "12".to_string(),
            total_area: "108".to_string(),
            size_classification: "Small".to_string(),
            lat: lat.to_string(),
            lng: lng.to_string(),
            survey_no: "12/3".to_string(),
            maps_link: String::new(),
            contact: "9876543210".to_string(),
            rate: "85000".to_string(),
        }
    }

    /// Same row with both coordinates set to the `Not Found` placeholder.
    pub fn without_coordinates(mut self) -> Self {
        self.lat = "Not Found".to_string();
        self.lng = "Not Found".to_string();
        self
    }

    pub fn with_layout(mut self, layout: &str) -> Self {
        self.layout = layout.to_string();
        self
    }

    pub fn with_coordinates(mut self, lat: &str, lng: &str) -> Self {
        self.lat = lat.to_string();
        self.lng = lng.to_string();
        self
    }

    pub fn with_maps_link(mut self, link: &str) -> Self {
        self.maps_link = link.to_string();
        self
    }

    pub fn with_contact(mut self, contact: &str) -> Self {
        self.contact = contact.to_string();
        self
    }

    pub fn with_serial(mut self, sl_no: &str) -> Self {
        self.sl_no = sl_no.to_string();
        self
    }

    /// Render as one CSV line, quoting cells that contain commas.
    pub fn to_csv_line(&self) -> String {
        let cells: [&str; header::COLUMN_COUNT] = [
            &self.sl_no,
            &self.site_size,
            &self.site_type,
            &self.layout,
            &self.layout_details,
            &self.site_no,
            &self.e_to_w,
            &self.n_to_s,
            &self.total_area,
            &self.size_classification,
            &self.lat,
            &self.lng,
            &self.survey_no,
            &self.maps_link,
            // Duplicate coordinate columns carry junk in real exports
            "0",
            "0",
            &self.contact,
            &self.total_area,
            &self.rate,
            "",
            "",
            "",
        ];

        cells
            .iter()
            .map(|cell| {
                if cell.contains(',') {
                    format!("\"{}\"", cell)
                } else {
                    cell.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Full export text: the three header lines followed by `rows`.
pub fn export_csv(rows: &[SiteRow]) -> String {
    export_csv_with_lines(&rows.iter().map(SiteRow::to_csv_line).collect::<Vec<_>>())
}

/// Full export text with arbitrary raw data lines.
pub fn export_csv_with_lines(lines: &[String]) -> String {
    let mut out = header::LINES.join("\n");
    for line in lines {
        out.push('\n');
        out.push_str(line);
    }
    out.push('\n');
    out
}

/// `count` rows numbered from 1, alternating located and unlocated sites and
/// cycling through a few layouts.
pub fn generate_rows(count: u32) -> Vec<SiteRow> {
    const LAYOUTS: [&str; 3] = [
        "Kumaraswamy Layout, 2nd Block",
        "BANASHNKARI 6TH STAGE, 1st Block",
        "Arkavathy Layout (Corner)",
    ];

    (1..=count)
        .map(|n| {
            let row = SiteRow::new(n).with_layout(LAYOUTS[(n as usize - 1) % LAYOUTS.len()]);
            if n % 2 == 0 {
                row.without_coordinates()
            } else {
                row
            }
        })
        .collect()
}
