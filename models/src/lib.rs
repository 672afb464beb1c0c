//! Wire models for the OPC Publisher REST API.
//!
//! Every type here is a plain data carrier. Optional fields are omitted from
//! serialized output when unset and accept both a missing key and `null` on
//! input; unknown keys are ignored.

pub mod error;
pub mod header;
pub mod model;
pub mod publish;
pub mod service_result;

pub use error::ErrorResponse;
pub use header::{
    CredentialApiModel, CredentialType, DiagnosticsApiModel, DiagnosticsLevel,
    RequestHeaderApiModel,
};
pub use model::{ApiModel, Attribute, ModelError};
pub use publish::{
    PublishStartRequestApiModel, PublishStartResponseApiModel, PublishStopRequestApiModel,
    PublishStopResponseApiModel, PublishedItemApiModel, PublishedItemListRequestApiModel,
    PublishedItemListResponseApiModel,
};
pub use service_result::{status, ServiceResultApiModel};
