//! Record types for the roster dataset
//!
//! This module contains:
//! - `InmateRecord`, the 25-column output row
//! - `InmateDetail`, the fields read from one detail page
//! - `DatasetBuilder` and `Dataset`, the mutable and frozen row collections

mod dataset;
mod inmate;

pub use dataset::{Dataset, DatasetBuilder};
pub use inmate::{InmateDetail, InmateRecord, COLUMNS, DETAIL_FAILED_NOTE};
