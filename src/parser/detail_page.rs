//! Inmate detail page parsing
//!
//! A detail page has two tables: an identity block (found by its `Name:`
//! label) and a charges table (found by its `ARRESTING AGENCY` header).
//! Both are checked cell by cell before anything is extracted.

use crate::parser::normalize::{bond_text, escape_delimiter, normalize_grade, DELIMITER};
use crate::parser::table::{tables_matching, HtmlTable};
use crate::record::InmateDetail;
use crate::{FormatError, FormatResult};

/// Anchor text of the identity table
pub const IDENTITY_ANCHOR: &str = "Name:";

/// Anchor text of the charges table
pub const CHARGES_ANCHOR: &str = "ARRESTING AGENCY";

/// Prefix of the cell holding the inmate id
pub const ID_PREFIX: &str = "MID#: ";

/// Charges table header, in order
pub const CHARGE_COLUMNS: [&str; 7] = [
    "ARRESTING AGENCY",
    "GRADE OF CHARGE",
    "CHARGE DESCRIPTION",
    "BOND AMOUNT",
    "BOND REMARKS",
    "BOND LAST UPDATED",
    "DISPOSITION",
];

const IDENTITY_SHAPE: (usize, usize) = (5, 4);
const LEFT_LABELS: [&str; 5] = [
    "Name:",
    "Address:",
    "Sex:",
    "Year of Birth:",
    "Booking Date/Time:",
];
const RIGHT_LABELS: [(usize, &str); 3] = [
    (2, "Race:"),
    (3, "Height/Weight:"),
    (4, "Released Date/Time:"),
];

const COL_AGENCY: usize = 0;
const COL_GRADE: usize = 1;
const COL_DESCRIPTION: usize = 2;
const COL_BOND_AMOUNT: usize = 3;
const COL_BOND_REMARKS: usize = 4;
const COL_BOND_UPDATED: usize = 5;
const COL_DISPOSITION: usize = 6;

/// Parses one detail page
///
/// # Returns
///
/// * `Ok(InmateDetail)` - Identity and charge fields, charges joined with `;`
/// * `Err(FormatError)` - Either table is missing or has changed
pub fn parse_detail(html: &str) -> FormatResult<InmateDetail> {
    let identity = single_table(html, IDENTITY_ANCHOR, false)?;
    let (inmate_id, address) = parse_identity(&identity)?;

    let charges = single_table(html, CHARGES_ANCHOR, true)?;
    let detail = parse_charges(&charges, inmate_id, address)?;

    Ok(detail)
}

fn single_table(html: &str, anchor: &str, header: bool) -> FormatResult<HtmlTable> {
    let mut tables = tables_matching(html, anchor);
    if tables.len() != 1 {
        return Err(FormatError::TableCount {
            context: format!("containing {:?}", anchor),
            found: tables.len(),
        });
    }
    let table = tables.remove(0);
    Ok(if header { table.with_header() } else { table })
}

/// Checks the identity table layout and returns (inmate id, address)
fn parse_identity(table: &HtmlTable) -> FormatResult<(String, String)> {
    if table.shape() != IDENTITY_SHAPE {
        return Err(FormatError::TableShape {
            expected: IDENTITY_SHAPE,
            found: table.shape(),
        });
    }

    let unexpected = |row: usize, col: usize| FormatError::UnexpectedCell {
        row,
        col,
        found: table.cell(row, col).map(str::to_string),
    };

    for (row, label) in LEFT_LABELS.iter().enumerate() {
        if table.cell(row, 0) != Some(*label) {
            return Err(unexpected(row, 0));
        }
        // blank addresses are allowed
        if row != 1 && table.cell(row, 1).is_none() {
            return Err(unexpected(row, 1));
        }
    }

    for (row, label) in RIGHT_LABELS {
        if table.cell(row, 2) != Some(label) {
            return Err(unexpected(row, 2));
        }
        if table.cell(row, 3).is_none() {
            return Err(unexpected(row, 3));
        }
    }

    for (row, col) in [(1, 2), (0, 3), (1, 3)] {
        if table.cell(row, col).is_some() {
            return Err(unexpected(row, col));
        }
    }

    let inmate_id = table
        .cell(0, 2)
        .and_then(|cell| cell.strip_prefix(ID_PREFIX))
        .filter(|id| !id.is_empty())
        .ok_or_else(|| unexpected(0, 2))?;

    let address = table.cell(1, 1).unwrap_or_default();

    Ok((inmate_id.to_string(), address.to_string()))
}

/// Checks the charges table and joins its per-charge values
fn parse_charges(
    table: &HtmlTable,
    inmate_id: String,
    address: String,
) -> FormatResult<InmateDetail> {
    if !table.header_is(&CHARGE_COLUMNS) {
        return Err(FormatError::ColumnsChanged {
            expected: CHARGE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: table.header.clone(),
        });
    }

    if table.rows.is_empty() {
        return Err(FormatError::NoCharges);
    }

    let cell = |row: usize, col: usize| table.cell(row, col).unwrap_or_default();
    let charge_rows = 0..table.rows.len();

    let mut agencies: Vec<String> = Vec::new();
    for row in charge_rows.clone() {
        let agency = table
            .cell(row, COL_AGENCY)
            .ok_or_else(|| FormatError::MissingValue {
                row,
                column: CHARGE_COLUMNS[COL_AGENCY].to_string(),
            })?;
        let agency = escape_delimiter(agency);
        if !agencies.contains(&agency) {
            agencies.push(agency);
        }
    }
    if agencies.len() > 1 {
        tracing::warn!(
            "Multiple arresting agencies for inmate {}, keeping all of them",
            inmate_id
        );
    }

    let mut severities = Vec::new();
    for row in charge_rows.clone() {
        let mut grade = cell(row, COL_GRADE);
        if grade == "L" {
            tracing::warn!(
                "Unknown grade of charge 'L' for inmate {}, replacing with ''",
                inmate_id
            );
            grade = "";
        }
        severities.push(normalize_grade(grade)?);
    }

    let charges: Vec<String> = charge_rows
        .clone()
        .map(|row| escape_delimiter(cell(row, COL_DESCRIPTION)))
        .collect();

    let bonds: Vec<String> = charge_rows
        .clone()
        .map(|row| {
            bond_text(
                cell(row, COL_BOND_AMOUNT),
                cell(row, COL_BOND_REMARKS),
                cell(row, COL_BOND_UPDATED),
            )
        })
        .collect();

    let statuses: Vec<String> = charge_rows
        .map(|row| escape_delimiter(cell(row, COL_DISPOSITION)))
        .collect();

    let separator = DELIMITER.to_string();
    Ok(InmateDetail {
        inmate_id,
        address,
        agency: agencies.join(&separator),
        severity: severities.join(&separator),
        charges: charges.join(&separator),
        bond_amount: bonds.join(&separator),
        current_status: statuses.join(&separator),
    })
}
