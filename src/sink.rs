use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Datelike, Local};
use csv::StringRecord;
use lazy_static::lazy_static;
use tokio::fs;

use crate::error::{ErrorLog, Failure};
use crate::record::ProductRecord;

lazy_static! {
    pub static ref PRODUCT_HEADERS: StringRecord =
        StringRecord::from(vec!["Title", "Price", "ImageUrl", "Url", "Time"]);
}

pub fn flatten<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    groups.into_iter().flatten().collect()
}

/// `YYYY-M-D.csv`, without zero padding
pub fn csv_file_name<D: Datelike>(date: &D) -> String {
    format!("{}-{}-{}.csv", date.year(), date.month(), date.day())
}

/// Writes today's CSV file into `dir`, replacing any previous one
pub fn write_csv(records: &[ProductRecord], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(csv_file_name(&Local::now().date_naive()));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;
    wtr.write_record(PRODUCT_HEADERS.iter())?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    Ok(path)
}

/// Creates `dir` when missing. Failures go to the error log, only a failure
/// to write that log is returned.
pub async fn ensure_dir(dir: &Path, log: &ErrorLog) -> io::Result<()> {
    match fs::metadata(dir).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match fs::create_dir(dir).await {
            Ok(()) => {
                log::info!("Created directory {}", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => {
                log::warn!("Couldn't create {} got: {e}", dir.display());
                log.append(&Failure::DirectoryCreate(dir.to_path_buf()))
            }
        },
        Err(e) => {
            log::warn!("Couldn't access {} got: {e}", dir.display());
            log.append(&Failure::DirectoryAccess(dir.to_path_buf()))
        }
    }
}
