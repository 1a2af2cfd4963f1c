//! HTML table extraction
//!
//! Turns `<table>` elements into rectangular grids of optional strings.
//! A cell whose text is empty after whitespace collapsing is `None`, so
//! "missing" and "blank" are the same thing to the validators.

use scraper::{ElementRef, Html, Selector};

/// Largest `colspan` honored; browsers clamp to the same value
const MAX_COLSPAN: usize = 1000;

/// A rectangular HTML table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    /// Column names, empty unless [`HtmlTable::with_header`] was applied
    pub header: Vec<String>,

    /// Body rows, all padded to the same width
    pub rows: Vec<Vec<Option<String>>>,
}

impl HtmlTable {
    /// Promotes the first row to the header
    pub fn with_header(mut self) -> Self {
        if self.rows.is_empty() {
            return self;
        }
        let first = self.rows.remove(0);
        self.header = first.into_iter().map(Option::unwrap_or_default).collect();
        self
    }

    /// Returns (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        let width = self
            .rows
            .first()
            .map(|r| r.len())
            .unwrap_or(self.header.len());
        (self.rows.len(), width)
    }

    /// Text of a cell, `None` when blank or out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// True when the header matches `expected` exactly, in order
    pub fn header_is(&self, expected: &[&str]) -> bool {
        self.header.len() == expected.len()
            && self.header.iter().zip(expected).all(|(a, b)| a == b)
    }
}

/// Reads every table in the document, outermost first
pub fn read_tables(html: &str) -> Vec<HtmlTable> {
    let document = Html::parse_document(html);
    select_tables(&document)
        .into_iter()
        .map(|table| read_table(&table))
        .collect()
}

/// Reads the tables whose text contains `anchor`
pub fn tables_matching(html: &str, anchor: &str) -> Vec<HtmlTable> {
    let document = Html::parse_document(html);
    select_tables(&document)
        .into_iter()
        .filter(|table| table.text().collect::<String>().contains(anchor))
        .map(|table| read_table(&table))
        .collect()
}

fn select_tables(document: &Html) -> Vec<ElementRef<'_>> {
    match Selector::parse("table") {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Reads one table, ignoring rows that belong to nested tables
fn read_table(table: &ElementRef<'_>) -> HtmlTable {
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(read_row(&child)),
            "thead" | "tbody" | "tfoot" => {
                for tr in child.children().filter_map(ElementRef::wrap) {
                    if tr.value().name() == "tr" {
                        rows.push(read_row(&tr));
                    }
                }
            }
            _ => {}
        }
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, None);
    }

    HtmlTable {
        header: Vec::new(),
        rows,
    }
}

fn read_row(tr: &ElementRef<'_>) -> Vec<Option<String>> {
    let mut cells = Vec::new();

    for cell in tr.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "td" && name != "th" {
            continue;
        }

        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);

        let text = cell_text(&cell);
        for _ in 0..span {
            cells.push(text.clone());
        }
    }

    cells
}

/// Collapses whitespace runs (NBSP included) and trims
fn cell_text(cell: &ElementRef<'_>) -> Option<String> {
    let raw: String = cell.text().collect();
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
