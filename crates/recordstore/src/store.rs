use thiserror::Error;
use tracing::{error, info};

use crate::{Dataset, Record, RecordStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error reading CSV file: {0}")]
    Read(String),

    #[error("Error writing CSV file: {0}")]
    Write(String),
}

impl StoreError {
    /// Caller-facing message without the underlying cause.
    pub fn public_message(&self) -> &'static str {
        match self {
            StoreError::Read(_) => "Error reading CSV file",
            StoreError::Write(_) => "Error writing CSV file",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub fn load_dataset<S: RecordStore + ?Sized>(store: &S) -> Result<Dataset> {
    let text = store.read_text().map_err(|e| {
        error!("reading backing file failed: {e}");
        StoreError::Read(e.to_string())
    })?;
    Dataset::parse(&text).map_err(|e| {
        error!("parsing backing file failed: {e}");
        StoreError::Read(e.to_string())
    })
}

/// Read-modify-write of the whole dataset with one extra row. Returns the new
/// row count. Nothing is written unless the read and parse succeed.
pub fn append_record<S: RecordStore + ?Sized>(store: &mut S, record: &Record) -> Result<usize> {
    let mut dataset = load_dataset(&*store)?;
    dataset.push(record);

    let text = dataset.to_csv().map_err(|e| {
        error!("serializing dataset failed: {e}");
        StoreError::Write(e.to_string())
    })?;
    store.write_text(&text).map_err(|e| {
        error!("writing backing file failed: {e}");
        StoreError::Write(e.to_string())
    })?;

    info!(rows = dataset.len(), "record appended");
    Ok(dataset.len())
}
