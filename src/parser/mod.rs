//! Page parsers for the roster and detail pages
//!
//! This module contains:
//! - HTML table extraction
//! - Field normalization and validation rules
//! - The roster page parser and detail link resolution
//! - The detail page parser

mod detail_page;
mod main_page;
mod normalize;
mod table;

pub use detail_page::{parse_detail, CHARGE_COLUMNS};
pub use main_page::{detail_links, parse_main, MainPageContext, MAIN_COLUMNS};
pub use normalize::{
    age_in_year, bond_text, escape_delimiter, normalize_bond_amount, normalize_booking_date,
    normalize_grade, normalize_race, normalize_sex, parse_birth_year, processing_numbers,
    split_name, RACES, TIMESTAMP_FORMAT,
};
pub use table::{read_tables, tables_matching, HtmlTable};
