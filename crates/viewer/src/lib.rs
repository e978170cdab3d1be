//! Client side of the record viewer: loads the dataset, keeps sort state and
//! drives the add-record form against the record server.

mod client;
mod form;
mod viewer;

pub use client::ViewerClient;
pub use form::{FormError, RecordForm};
pub use viewer::{SubmitOutcome, Viewer};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected record ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Csv(#[from] recordstore::CsvError),

    #[error(transparent)]
    Form(#[from] FormError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
