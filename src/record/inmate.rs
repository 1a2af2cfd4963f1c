//! Per-inmate row types

use serde::{Deserialize, Serialize};

/// Placed in `notes` until the inmate's detail page has been merged
pub const DETAIL_FAILED_NOTE: &str = "Failed to load inmate detail page. Leaving some fields blank";

/// Column names in output order
pub const COLUMNS: [&str; 25] = [
    "county_name",
    "timestamp",
    "url",
    "inmate_id",
    "inmate_lastname",
    "inmate_firstname",
    "inmate_middlename",
    "inmate_sex",
    "inmate_race",
    "inmate_age",
    "inmate_dob",
    "inmate_address",
    "booking_timestamp",
    "release_timestamp",
    "processing_numbers",
    "agency",
    "facility",
    "charges",
    "severity",
    "bond_amount",
    "current_status",
    "court_dates",
    "days_jailed",
    "other",
    "notes",
];

/// One booked individual, one CSV row
///
/// Field order is the CSV column order. Every value is kept as a string so
/// that writing and re-reading a file is lossless. The multi-charge fields
/// (`charges`, `severity`, `bond_amount`, `current_status`) hold one
/// `;`-separated entry per charge, aligned by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InmateRecord {
    pub county_name: String,
    pub timestamp: String,
    pub url: String,
    pub inmate_id: String,
    pub inmate_lastname: String,
    pub inmate_firstname: String,
    pub inmate_middlename: String,
    pub inmate_sex: String,
    pub inmate_race: String,
    pub inmate_age: String,
    pub inmate_dob: String,
    pub inmate_address: String,
    pub booking_timestamp: String,
    /// Not published by the source
    pub release_timestamp: String,
    pub processing_numbers: String,
    pub agency: String,
    pub facility: String,
    pub charges: String,
    pub severity: String,
    pub bond_amount: String,
    pub current_status: String,
    /// Not published by the source
    pub court_dates: String,
    /// Not published by the source
    pub days_jailed: String,
    /// Not published by the source
    pub other: String,
    pub notes: String,
}

impl InmateRecord {
    /// Copies the fields only a detail page provides into this record
    pub fn apply_detail(&mut self, detail: InmateDetail, url: &str) {
        self.url = url.to_string();
        self.inmate_address = detail.address;
        self.agency = detail.agency;
        self.severity = detail.severity;
        self.charges = detail.charges;
        self.bond_amount = detail.bond_amount;
        self.current_status = detail.current_status;
        self.notes.clear();
    }

    /// True once a detail page has been merged into this record
    pub fn has_detail(&self) -> bool {
        self.notes != DETAIL_FAILED_NOTE
    }
}

/// Fields extracted from one inmate detail page
///
/// The charge fields are already normalized and joined with `;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InmateDetail {
    pub inmate_id: String,
    pub address: String,
    pub agency: String,
    pub severity: String,
    pub charges: String,
    pub bond_amount: String,
    pub current_status: String,
}
