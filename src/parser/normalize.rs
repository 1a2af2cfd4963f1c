//! Field normalization rules
//!
//! Each function takes one raw cell value and either returns the value in
//! output form or a [`FormatError`] naming the input it did not recognize.
//! Nothing here guesses: values outside the known set are errors.

use crate::{FormatError, FormatResult};
use chrono::NaiveDateTime;

/// Separator between per-charge values and between processing numbers
pub const DELIMITER: char = ';';

/// Source format of booking dates, e.g. `3/14/2018 10:05:00 PM`
pub const BOOKING_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Output format of every timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S EST";

/// Races the output may contain
pub const RACES: [&str; 5] = ["asian", "white", "black", "hispanic", "middle-eastern"];

/// Replaces the delimiter inside a value so joined fields stay splittable
pub fn escape_delimiter(value: &str) -> String {
    value.replace(DELIMITER, ":")
}

/// Splits `LAST, FIRST [MIDDLE...]` into (last, first, middle)
///
/// The middle name is everything after the first name. Last and middle names may be empty.
///
/// # Example
///
/// ```
/// use clarke_roster::parser::split_name;
///
/// let (last, first, middle) = split_name("SMITH, JOHN ROBERT").unwrap();
/// assert_eq!((last.as_str(), first.as_str(), middle.as_str()), ("SMITH", "JOHN", "ROBERT"));
/// ```
pub fn split_name(name: &str) -> FormatResult<(String, String, String)> {
    let invalid = || FormatError::InvalidName(name.to_string());

    let (last, rest) = name.split_once(", ").ok_or_else(invalid)?;
    if rest.is_empty() {
        return Err(invalid());
    }

    let (first, middle) = rest.split_once(' ').unwrap_or((rest, ""));
    if first.is_empty() {
        return Err(invalid());
    }

    Ok((last.to_string(), first.to_string(), middle.to_string()))
}

/// Maps `MALE`/`FEMALE` to `m`/`f`
pub fn normalize_sex(sex: &str) -> FormatResult<&'static str> {
    match sex {
        "MALE" => Ok("m"),
        "FEMALE" => Ok("f"),
        other => Err(FormatError::InvalidSex(other.to_string())),
    }
}

/// Lowercases a race and maps the site's spellings onto [`RACES`]
pub fn normalize_race(race: &str) -> FormatResult<String> {
    let race = race
        .to_lowercase()
        .replace("black/african american", "black")
        .replace("hispanic or latino", "hispanic")
        // sic
        .replace("middle eastern decent", "middle-eastern");

    if RACES.contains(&race.as_str()) {
        Ok(race)
    } else {
        Err(FormatError::InvalidRace(race))
    }
}

/// Converts `m/d/Y h:m:s AM|PM` into [`TIMESTAMP_FORMAT`]
pub fn normalize_booking_date(date: &str) -> FormatResult<String> {
    NaiveDateTime::parse_from_str(date, BOOKING_DATE_FORMAT)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .map_err(|_| FormatError::InvalidBookingDate(date.to_string()))
}

/// Parses a four-digit year of birth
pub fn parse_birth_year(year: &str) -> FormatResult<i32> {
    if year.chars().count() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::InvalidBirthYear(year.to_string()));
    }
    year.parse()
        .map_err(|_| FormatError::InvalidBirthYear(year.to_string()))
}

/// Age the inmate turns during `scrape_year`
///
/// Only the birth year is published, so month and day are ignored. This
/// never makes an 18-year-old look 17.
pub fn age_in_year(birth_year: i32, scrape_year: i32) -> String {
    (scrape_year - birth_year).to_string()
}

/// Builds `Case # <case>;Police case # <police>`
///
/// Missing numbers leave their slot empty; both prefixes and the separator
/// are always present.
pub fn processing_numbers(case_number: Option<&str>, police_case: Option<&str>) -> String {
    format!(
        "Case # {}{}Police case # {}",
        escape_delimiter(case_number.unwrap_or_default()),
        DELIMITER,
        escape_delimiter(police_case.unwrap_or_default())
    )
}

/// Maps a grade of charge to its severity
///
/// `L` is not handled here; callers decide how to report it.
pub fn normalize_grade(grade: &str) -> FormatResult<&'static str> {
    match grade {
        "M" => Ok("misdemeanor"),
        "F" => Ok("felony"),
        "" => Ok(""),
        other => Err(FormatError::InvalidGrade(other.to_string())),
    }
}

/// Normalizes a bond amount
///
/// `$0.00` and a bare `$` mean no bond was set and become empty;
/// thousands separators are dropped.
pub fn normalize_bond_amount(amount: &str) -> String {
    match amount {
        "$0.00" | "$" => String::new(),
        other => escape_delimiter(&other.replace(',', "")),
    }
}

/// Per-charge bond text: amount, remarks and last update
pub fn bond_text(amount: &str, remarks: &str, last_updated: &str) -> String {
    // " Bond last updated" is its own space-separated piece, hence two spaces
    format!(
        "{} {}  Bond last updated {}",
        normalize_bond_amount(amount),
        escape_delimiter(remarks),
        escape_delimiter(last_updated)
    )
}
