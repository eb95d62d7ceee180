//! Fixtures mirroring the layout of the auction site export.

/// The three physical header lines of the export.
///
/// The contact label and the metric area label are each wrapped across a
/// line break inside a quoted cell, exactly as the spreadsheet exports them.
pub mod header {
    pub const LINE_1: &str = "Sl_No,Site Size,Type,Layout,Layout Details,Site_No,E to W,N to S,\
Total_Area (in sq.m),Size Classification,Lat,Long,Survey.No.,Google Maps Link,Lat,Long,\
\"Contact Number - Site Information Coordinator";
    pub const LINE_2: &str = "9am-5pm on working days\",\"Total Area";
    pub const LINE_3: &str = "(in Sqm)\",Rate Per Sq.Mtr in Rs.,Rate per sq.ft in Rs.,\
Total Area (in sq ft),Total Minimum Bid Price";

    pub const LINES: [&str; 3] = [LINE_1, LINE_2, LINE_3];

    /// Logical columns after reconciliation.
    pub const COLUMN_COUNT: usize = 22;

    /// Merged name of the coordinator contact column
    pub const CONTACT_COLUMN: &str =
        "Contact Number - Site Information Coordinator\n9am-5pm on working days";

    /// Merged name of the metric area column
    pub const AREA_COLUMN: &str = "Total Area\n(in Sqm)";
}

/// Header variant where the wrapped labels land in separate unquoted cells.
pub mod split_header {
    pub const LINE_1: &str = "Sl_No,Layout,Contact Number - Site Information Coordinator";
    pub const LINE_2: &str = ",9am-5pm on working days,Total Area";
    pub const LINE_3: &str = ",(in Sqm),Rate Per Sq.Mtr in Rs.";

    pub const LINES: [&str; 3] = [LINE_1, LINE_2, LINE_3];
}

/// Known coordinates for test sites.
pub mod coords {
    /// Bengaluru city centre
    pub const BENGALURU: (f64, f64) = (12.9716, 77.5946);

    /// Banashankari
    pub const BANASHANKARI: (f64, f64) = (12.9255, 77.5468);

    /// Out of range latitude
    pub const INVALID_LAT: (f64, f64) = (120.0, 77.5);
}
