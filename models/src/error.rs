use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a non-2xx response. Application-level failures of a publish call
/// travel in `errorInfo` instead; this is only for transport-level errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_code: &str, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            error_code: Some(error_code.to_string()),
            ..Default::default()
        }
    }
}
