//! CSV serialization of the finished dataset

use crate::record::{Dataset, InmateRecord, COLUMNS};
use crate::RosterError;
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Builds `<county>_current-inmate-roster_YYYY_MM_DD_HH_MM_SS.csv`
pub fn output_file_name(county_name: &str, scraped_at: NaiveDateTime) -> String {
    format!(
        "{}_current-inmate-roster_{}.csv",
        county_name,
        scraped_at.format("%Y_%m_%d_%H_%M_%S")
    )
}

/// Writes the dataset into `directory`, creating it if needed
///
/// # Arguments
///
/// * `dataset` - The finished dataset
/// * `directory` - Output directory, relative paths resolve against the working directory
/// * `county_name` - File name prefix
/// * `scraped_at` - Scrape time embedded in the file name
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(RosterError)` - Failed to create or write the file
pub fn write_csv(
    dataset: &Dataset,
    directory: &Path,
    county_name: &str,
    scraped_at: NaiveDateTime,
) -> Result<PathBuf, RosterError> {
    fs::create_dir_all(directory)?;

    let path = directory.join(output_file_name(county_name, scraped_at));
    let file = File::create(&path)?;
    write_records(dataset, file)?;

    tracing::info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(path)
}

/// Writes a header row and one row per record, `\n`-terminated
///
/// The header is written even for an empty dataset.
pub fn write_records<W: Write>(dataset: &Dataset, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for record in dataset.iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a file written by [`write_csv`]
///
/// Fails if the header differs from the output columns.
pub fn read_csv(path: &Path) -> Result<Vec<InmateRecord>, RosterError> {
    let mut rdr = csv::Reader::from_path(path)?;

    let headers = rdr.headers()?.clone();
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(RosterError::Csv(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unexpected CSV header: {:?}", headers),
        ))));
    }

    let records = rdr
        .deserialize::<InmateRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
