use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::model::{ApiModel, Attribute};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialType {
    None,
    UserName,
    X509Certificate,
    JwtToken,
}

/// Credential used to elevate a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialApiModel {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<CredentialType>,
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ApiModel for CredentialApiModel {
    const TYPE_NAME: &'static str = "CredentialApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("credential_type", "type", "CredentialType"),
        Attribute::new("value", "value", "object"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticsLevel {
    None,
    Status,
    Operations,
    Diagnostics,
    Verbose,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsApiModel {
    #[serde(rename = "level", skip_serializing_if = "Option::is_none")]
    pub level: Option<DiagnosticsLevel>,
    #[serde(rename = "auditId", skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<String>,
    #[serde(
        rename = "timeStamp",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_stamp: Option<OffsetDateTime>,
}

impl ApiModel for DiagnosticsApiModel {
    const TYPE_NAME: &'static str = "DiagnosticsApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("level", "level", "DiagnosticsLevel"),
        Attribute::new("audit_id", "auditId", "str"),
        Attribute::new("time_stamp", "timeStamp", "iso-8601"),
    ];
}

/// Per-request header carried by publish start and stop requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestHeaderApiModel {
    #[serde(rename = "elevation", skip_serializing_if = "Option::is_none")]
    pub elevation: Option<CredentialApiModel>,
    #[serde(rename = "locales", skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    #[serde(rename = "diagnostics", skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsApiModel>,
}

impl ApiModel for RequestHeaderApiModel {
    const TYPE_NAME: &'static str = "RequestHeaderApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("elevation", "elevation", "CredentialApiModel"),
        Attribute::new("locales", "locales", "[str]"),
        Attribute::new("diagnostics", "diagnostics", "DiagnosticsApiModel"),
    ];
}
