//! Tabular export of the enriched dataset.
//!
//! One row per entry, stable column set `ref_number, pub_date, short_text,
//! url, long_text`, in accumulation order. The resulting file is what the
//! review spreadsheet and the classifier's feature extraction consume.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, ScraperError};
use crate::types::EnrichedEntry;

/// Write the dataset as CSV into `output_dir`.
///
/// The file is named `{start}_{end}_scraping_results.csv`.
///
/// # Arguments
/// * `entries` - Enriched dataset, written in the given order
/// * `start_date` / `end_date` - The queried range, used for the file name
/// * `output_dir` - Existing directory to write into
///
/// # Returns
/// Path of the written file.
pub fn export_csv(
    entries: &[EnrichedEntry],
    start_date: NaiveDate,
    end_date: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf> {
    validate_output_dir(output_dir)?;

    let filename = export_filename(start_date, end_date);
    let path = output_dir.join(filename);

    // Header is written explicitly so an empty dataset still yields it
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;
    writer.write_record(["ref_number", "pub_date", "short_text", "url", "long_text"])?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = entries.len(), "dataset exported");
    Ok(path)
}

/// File name for an exported range.
pub fn export_filename(start_date: NaiveDate, end_date: NaiveDate) -> String {
    format!("{start_date}_{end_date}_scraping_results.csv")
}

/// Validate that the output directory exists before any work is done.
pub fn validate_output_dir(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        return Err(ScraperError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", output_dir.display()),
        )));
    }
    if !output_dir.is_dir() {
        return Err(ScraperError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", output_dir.display()),
        )));
    }
    Ok(())
}
