//! CSV-backed record store
//!
//! Parses and serializes the delimited dataset, resolves submitted fields to
//! header columns, and appends records through an injectable storage seam.

mod dataset;
mod record;
mod sort;
mod storage;
mod store;
mod value;

pub use dataset::{CsvError, Dataset};
pub use record::{FormField, Record};
pub use sort::{SortDirection, SortState};
pub use storage::{FileRecordStore, InMemoryRecordStore, RecordStore};
pub use store::{append_record, load_dataset, Result, StoreError};
pub use value::Value;
