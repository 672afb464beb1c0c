use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{ApiModel, Attribute};

/// OPC UA status codes reported in `errorInfo.statusCode`.
///
/// The wire carries them as signed 32-bit integers, so the high bit of the
/// `Bad` severity shows up as a negative number.
pub mod status {
    pub const GOOD: i32 = 0;
    pub const BAD_NODE_ID_INVALID: i32 = 0x8033_0000_u32 as i32;
    pub const BAD_NODE_ID_UNKNOWN: i32 = 0x8034_0000_u32 as i32;
    pub const BAD_INVALID_ARGUMENT: i32 = 0x80AB_0000_u32 as i32;

    pub fn is_bad(code: i32) -> bool {
        (code as u32) & 0x8000_0000 != 0
    }
}

/// Outcome of a service call. A missing or zero `statusCode` means success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceResultApiModel {
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i32>,
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(rename = "diagnostics", skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Value>,
}

impl ServiceResultApiModel {
    pub fn error(status_code: i32, error_message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            error_message: Some(error_message.into()),
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Value) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn is_good(&self) -> bool {
        self.status_code.map_or(true, |code| code == status::GOOD)
    }
}

impl ApiModel for ServiceResultApiModel {
    const TYPE_NAME: &'static str = "ServiceResultApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("status_code", "statusCode", "int"),
        Attribute::new("error_message", "errorMessage", "str"),
        Attribute::new("diagnostics", "diagnostics", "object"),
    ];
}
