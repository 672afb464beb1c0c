use opc_publisher_models::{ErrorResponse, ModelError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {method} {url} failed: status={status} {}", describe(.error.as_ref(), .body))]
    Status {
        method: String,
        url: String,
        status: u16,
        error: Option<ErrorResponse>,
        body: String,
    },
    #[error("invalid response body: {0}")]
    Deserialize(#[source] ModelError),
    #[error("invalid request body: {0}")]
    Serialize(#[source] ModelError),
}

impl ClientError {
    /// HTTP status of a failed call, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            ClientError::Status {
                error: Some(e), ..
            } => e.error_code.as_deref(),
            _ => None,
        }
    }
}

fn describe(error: Option<&ErrorResponse>, body: &str) -> String {
    match error {
        Some(e) => format!(
            "error_code={:?} error={:?} request_id={:?} retry_after={:?} hint={:?} details={}",
            e.error_code,
            e.error,
            e.request_id,
            e.retry_after,
            e.hint,
            e.details
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "null".to_string())
        ),
        None => format!("body={}", body),
    }
}
