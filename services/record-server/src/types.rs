use serde::{Deserialize, Serialize};

/// Body of every response from the append endpoint, success or failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub const MSG_UPDATED: &str = "CSV updated successfully";
