//! Roster page parsing
//!
//! The roster page holds a single table with one row per inmate. Every
//! assumption about that table is checked, so a redesign of the site stops
//! the run instead of producing shifted or half-filled rows.

use crate::parser::normalize::{
    age_in_year, normalize_booking_date, normalize_race, normalize_sex, parse_birth_year,
    processing_numbers, split_name,
};
use crate::parser::table::read_tables;
use crate::record::{DatasetBuilder, InmateRecord, DETAIL_FAILED_NOTE};
use crate::{FormatError, FormatResult};
use chrono::{Datelike, NaiveDateTime};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Roster table header, in order
pub const MAIN_COLUMNS: [&str; 11] = [
    "MID#",
    "NAME",
    "SEX",
    "RACE",
    "BOOKING DATE",
    "CHARGE",
    "BOND AMOUNT",
    "CASE NUMBER",
    "POLICE CASE#",
    "YEAR OF BIRTH",
    "VISITATION",
];

const COL_ID: usize = 0;
const COL_NAME: usize = 1;
const COL_SEX: usize = 2;
const COL_RACE: usize = 3;
const COL_BOOKING_DATE: usize = 4;
const COL_CASE_NUMBER: usize = 7;
const COL_POLICE_CASE: usize = 8;
const COL_YEAR_OF_BIRTH: usize = 9;

/// Run-wide values stamped onto every roster row
#[derive(Debug, Clone)]
pub struct MainPageContext {
    /// URL the roster was fetched from
    pub root_url: String,

    /// When the roster was fetched; drives `timestamp` and `inmate_age`
    pub scraped_at: NaiveDateTime,

    pub county_name: String,
    pub facility: String,
}

/// Parses the roster page into a dataset builder
///
/// Detail-only fields stay empty, `url` is the roster URL and `notes` holds
/// the detail-failure sentinel until a detail page is merged.
///
/// # Arguments
///
/// * `html` - The roster page
/// * `context` - Run-wide values
///
/// # Returns
///
/// * `Ok(DatasetBuilder)` - One record per roster row, in page order
/// * `Err(FormatError)` - The page does not look as expected
pub fn parse_main(html: &str, context: &MainPageContext) -> FormatResult<DatasetBuilder> {
    let mut tables = read_tables(html);
    if tables.len() != 1 {
        return Err(FormatError::TableCount {
            context: "on roster page".to_string(),
            found: tables.len(),
        });
    }
    let table = tables.remove(0).with_header();

    if !table.header_is(&MAIN_COLUMNS) {
        return Err(FormatError::ColumnsChanged {
            expected: MAIN_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: table.header.clone(),
        });
    }

    // The site emits an extra <tr> right under the header
    let mut rows = table.rows.into_iter();
    match rows.next() {
        Some(artifact) if artifact.iter().all(Option::is_none) => {}
        _ => return Err(FormatError::MissingArtifactRow),
    }

    let timestamp = context
        .scraped_at
        .format(crate::parser::normalize::TIMESTAMP_FORMAT)
        .to_string();
    let scrape_year = context.scraped_at.year();

    let mut seen_ids = HashSet::new();
    let mut records = Vec::new();

    for (ix, row) in rows.enumerate() {
        let required = |col: usize| required_cell(&row, ix, col);

        let inmate_id = required(COL_ID)?;
        if !seen_ids.insert(inmate_id.to_string()) {
            return Err(FormatError::DuplicateId(inmate_id.to_string()));
        }

        let (lastname, firstname, middlename) = split_name(required(COL_NAME)?)?;
        let sex = normalize_sex(required(COL_SEX)?)?;
        let race = normalize_race(required(COL_RACE)?)?;
        let booking_timestamp = normalize_booking_date(required(COL_BOOKING_DATE)?)?;
        let dob = required(COL_YEAR_OF_BIRTH)?;
        let birth_year = parse_birth_year(dob)?;

        records.push(InmateRecord {
            county_name: context.county_name.clone(),
            timestamp: timestamp.clone(),
            url: context.root_url.clone(),
            inmate_id: inmate_id.to_string(),
            inmate_lastname: lastname,
            inmate_firstname: firstname,
            inmate_middlename: middlename,
            inmate_sex: sex.to_string(),
            inmate_race: race,
            inmate_age: age_in_year(birth_year, scrape_year),
            inmate_dob: dob.to_string(),
            booking_timestamp,
            processing_numbers: processing_numbers(
                row[COL_CASE_NUMBER].as_deref(),
                row[COL_POLICE_CASE].as_deref(),
            ),
            facility: context.facility.clone(),
            notes: DETAIL_FAILED_NOTE.to_string(),
            ..Default::default()
        });
    }

    tracing::info!("Parsed {} inmates from roster page", records.len());
    Ok(DatasetBuilder::new(records))
}

fn required_cell(row: &[Option<String>], ix: usize, col: usize) -> FormatResult<&str> {
    row[col].as_deref().ok_or_else(|| FormatError::MissingValue {
        row: ix,
        column: MAIN_COLUMNS[col].to_string(),
    })
}

/// Resolves the detail page URL of every roster link
///
/// Links open their target through `onclick`, for example
/// `window.open('detailsNEW.asp?id=-59091&bid=2017-00004550&pg=1&curr=yes', 'search', ...)`.
/// The first quoted argument is resolved against the roster URL.
///
/// # Arguments
///
/// * `html` - The roster page
/// * `root_url` - URL the roster was fetched from
/// * `expected` - Number of roster rows; the link count must match it
pub fn detail_links(html: &str, root_url: &Url, expected: usize) -> FormatResult<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]")
        .map_err(|e| FormatError::InvalidLink(format!("bad selector: {}", e)))?;

    let anchors: Vec<_> = document.select(&selector).collect();
    if anchors.len() != expected {
        return Err(FormatError::LinkCount {
            links: anchors.len(),
            rows: expected,
        });
    }

    anchors
        .into_iter()
        .map(|a| {
            let onclick = a.value().attr("onclick").unwrap_or_default();
            resolve_onclick(onclick, root_url)
        })
        .collect()
}

/// Resolves the first quoted argument of a `window.open(...)` handler
fn resolve_onclick(onclick: &str, root_url: &Url) -> FormatResult<String> {
    let invalid = || FormatError::InvalidLink(onclick.to_string());

    let first_arg = onclick.split(',').next().ok_or_else(invalid)?;
    let target = first_arg.split('\'').nth(1).ok_or_else(invalid)?;
    if target.is_empty() {
        return Err(invalid());
    }

    root_url
        .join(target)
        .map(|u| u.to_string())
        .map_err(|_| invalid())
}
