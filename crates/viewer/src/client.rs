use recordstore::{Dataset, Record};
use serde::Deserialize;

use crate::{Result, ViewerError};

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// HTTP access to the record server.
#[derive(Clone, Debug)]
pub struct ViewerClient {
    base_url: String,
    client: reqwest::Client,
}

impl ViewerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_dataset(&self) -> Result<Dataset> {
        let url = format!("{}/diabetes.csv", self.base_url);
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(Dataset::parse(&text)?)
    }

    /// Posts one record. A non-2xx answer carries the server's message.
    pub async fn append(&self, record: &Record) -> Result<String> {
        let url = format!("{}/update-csv", self.base_url);
        let resp = self.client.post(url).json(record).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        let message = serde_json::from_str::<MessageBody>(&body)
            .map(|m| m.message)
            .unwrap_or(body);

        if !status.is_success() {
            return Err(ViewerError::Rejected { status: status.as_u16(), message });
        }
        Ok(message)
    }
}
