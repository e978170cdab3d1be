use recordstore::{Dataset, Record, SortDirection, SortState};
use tracing::{error, info};

use crate::{Result, RecordForm, ViewerClient};

/// What happened after a record was accepted by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The dataset was re-fetched and now includes the new row.
    Refreshed,
    /// The record was stored but re-fetching the dataset failed; the old rows
    /// are still shown.
    RefreshFailed,
}

/// Headless state of the data table and its entry form.
pub struct Viewer {
    client: ViewerClient,
    data: Dataset,
    sort: SortState,
    form: RecordForm,
}

impl Viewer {
    pub fn new(client: ViewerClient) -> Self {
        Self {
            client,
            data: Dataset::default(),
            sort: SortState::new(),
            form: RecordForm::new(),
        }
    }

    /// Fetches the dataset. On failure the previous rows stay in place.
    pub async fn load(&mut self) -> Result<()> {
        match self.client.fetch_dataset().await {
            Ok(ds) => {
                info!(rows = ds.len(), "dataset loaded");
                self.data = ds;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching data: {e}");
                Err(e)
            }
        }
    }

    pub fn sort(&mut self, column: &str) {
        self.sort.select(column);
    }

    pub fn sort_indicator(&self, column: &str) -> Option<SortDirection> {
        self.sort.indicator(column)
    }

    pub fn columns(&self) -> &[String] {
        self.data.columns()
    }

    /// Rows in display order, re-sorted from the loaded data on every call.
    pub fn rows(&self) -> Vec<&Record> {
        self.sort.apply(self.data.rows())
    }

    pub fn form(&self) -> &RecordForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RecordForm {
        &mut self.form
    }

    /// Validates and sends the form. On success the form is cleared and the
    /// dataset re-fetched; on failure the error is logged and the form kept.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let record = self.form.validate().map_err(|e| {
            error!("Invalid entry: {e}");
            crate::ViewerError::from(e)
        })?;

        if let Err(e) = self.client.append(&record).await {
            error!("Error adding data: {e}");
            return Err(e);
        }

        self.form.clear();
        match self.load().await {
            Ok(()) => Ok(SubmitOutcome::Refreshed),
            Err(_) => Ok(SubmitOutcome::RefreshFailed),
        }
    }
}
