//! Output module for writing scrape results
//!
//! This module handles:
//! - Writing the dataset to a timestamped CSV file
//! - Reading a written file back
//! - Summarizing a completed run

mod csv_writer;
mod summary;

pub use csv_writer::{output_file_name, read_csv, write_csv, write_records};
pub use summary::RunSummary;
