use serde::{Deserialize, Serialize};

use crate::header::RequestHeaderApiModel;
use crate::model::{ApiModel, Attribute};
use crate::service_result::ServiceResultApiModel;

/// A node whose value changes are published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedItemApiModel {
    #[serde(rename = "nodeId")]
    pub node_id: String,
    #[serde(rename = "browsePath", skip_serializing_if = "Option::is_none")]
    pub browse_path: Option<Vec<String>>,
    /// Milliseconds.
    #[serde(rename = "publishingInterval", skip_serializing_if = "Option::is_none")]
    pub publishing_interval: Option<i32>,
    /// Milliseconds.
    #[serde(rename = "samplingInterval", skip_serializing_if = "Option::is_none")]
    pub sampling_interval: Option<i32>,
}

impl PublishedItemApiModel {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Default::default()
        }
    }
}

impl ApiModel for PublishedItemApiModel {
    const TYPE_NAME: &'static str = "PublishedItemApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("node_id", "nodeId", "str"),
        Attribute::new("browse_path", "browsePath", "[str]"),
        Attribute::new("publishing_interval", "publishingInterval", "int"),
        Attribute::new("sampling_interval", "samplingInterval", "int"),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishStartRequestApiModel {
    #[serde(rename = "item")]
    pub item: PublishedItemApiModel,
    #[serde(rename = "header", skip_serializing_if = "Option::is_none")]
    pub header: Option<RequestHeaderApiModel>,
}

impl PublishStartRequestApiModel {
    pub fn new(item: PublishedItemApiModel) -> Self {
        Self { item, header: None }
    }
}

impl ApiModel for PublishStartRequestApiModel {
    const TYPE_NAME: &'static str = "PublishStartRequestApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("item", "item", "PublishedItemApiModel"),
        Attribute::new("header", "header", "RequestHeaderApiModel"),
    ];
}

/// Result of a publish start request.
///
/// `error_info` is `None` when the node was published. A value here is an
/// application-level failure reported with a successful HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishStartResponseApiModel {
    #[serde(rename = "errorInfo", skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ServiceResultApiModel>,
}

impl PublishStartResponseApiModel {
    pub fn new(error_info: Option<ServiceResultApiModel>) -> Self {
        Self { error_info }
    }
}

impl ApiModel for PublishStartResponseApiModel {
    const TYPE_NAME: &'static str = "PublishStartResponseApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::new(
        "error_info",
        "errorInfo",
        "ServiceResultApiModel",
    )];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishStopRequestApiModel {
    #[serde(rename = "nodeId")]
    pub node_id: String,
    #[serde(rename = "browsePath", skip_serializing_if = "Option::is_none")]
    pub browse_path: Option<Vec<String>>,
    #[serde(rename = "header", skip_serializing_if = "Option::is_none")]
    pub header: Option<RequestHeaderApiModel>,
}

impl PublishStopRequestApiModel {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Default::default()
        }
    }
}

impl ApiModel for PublishStopRequestApiModel {
    const TYPE_NAME: &'static str = "PublishStopRequestApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("node_id", "nodeId", "str"),
        Attribute::new("browse_path", "browsePath", "[str]"),
        Attribute::new("header", "header", "RequestHeaderApiModel"),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishStopResponseApiModel {
    #[serde(rename = "errorInfo", skip_serializing_if = "Option::is_none")]
    pub error_info: Option<ServiceResultApiModel>,
}

impl PublishStopResponseApiModel {
    pub fn new(error_info: Option<ServiceResultApiModel>) -> Self {
        Self { error_info }
    }
}

impl ApiModel for PublishStopResponseApiModel {
    const TYPE_NAME: &'static str = "PublishStopResponseApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::new(
        "error_info",
        "errorInfo",
        "ServiceResultApiModel",
    )];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedItemListRequestApiModel {
    #[serde(rename = "continuationToken", skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl ApiModel for PublishedItemListRequestApiModel {
    const TYPE_NAME: &'static str = "PublishedItemListRequestApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::new(
        "continuation_token",
        "continuationToken",
        "str",
    )];
}

/// One page of published items. `continuation_token` is set while more pages remain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedItemListResponseApiModel {
    #[serde(rename = "items", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PublishedItemApiModel>>,
    #[serde(rename = "continuationToken", skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl ApiModel for PublishedItemListResponseApiModel {
    const TYPE_NAME: &'static str = "PublishedItemListResponseApiModel";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::new("items", "items", "[PublishedItemApiModel]"),
        Attribute::new("continuation_token", "continuationToken", "str"),
    ];
}
