//! Error types for the API client

use paperless_core::{ConfigError, CustomFieldError};
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, PaperlessError>;

#[derive(Debug, thiserror::Error)]
pub enum PaperlessError {
    /// The server answered with a non-success status. The body is kept verbatim.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    CustomField(#[from] CustomFieldError),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Import task {task_id} did not finish after {attempts} polls")]
    PollLimitExceeded { task_id: Uuid, attempts: u32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PaperlessError {
    /// HTTP status of an `Api` error
    pub fn status(&self) -> Option<u16> {
        match self {
            PaperlessError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
