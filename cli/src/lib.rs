//! Client SDK for the OPC Publisher REST API.

pub mod config;
pub mod error;
pub mod http_client;
pub mod publisher;

pub use error::ClientError;
pub use http_client::{Client, Credential};
pub use publisher::PublisherClient;
