use opc_publisher_models::{
    ApiModel, ModelError, PublishStartRequestApiModel, PublishStartResponseApiModel,
    PublishStopRequestApiModel, PublishStopResponseApiModel, PublishedItemApiModel,
    PublishedItemListRequestApiModel, PublishedItemListResponseApiModel,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use tracing::{debug, info};

use crate::error::ClientError;
use crate::http_client::Client;

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Typed operations of the publisher API.
///
/// Application-level failures come back as `errorInfo` on the returned model;
/// only transport, status and decoding failures are errors here.
#[derive(Clone)]
pub struct PublisherClient {
    client: Client,
}

impl PublisherClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Start publishing node values of an activated endpoint.
    pub async fn start_publishing_values(
        &self,
        endpoint_id: &str,
        request: &PublishStartRequestApiModel,
    ) -> Result<PublishStartResponseApiModel, ClientError> {
        info!(
            "Start publishing {} on endpoint {}",
            request.item.node_id, endpoint_id
        );
        let path = format!("v2/publish/{}/start", segment(endpoint_id));
        self.post(&path, request).await
    }

    /// Stop publishing node values of an activated endpoint.
    pub async fn stop_publishing_values(
        &self,
        endpoint_id: &str,
        request: &PublishStopRequestApiModel,
    ) -> Result<PublishStopResponseApiModel, ClientError> {
        info!(
            "Stop publishing {} on endpoint {}",
            request.node_id, endpoint_id
        );
        let path = format!("v2/publish/{}/stop", segment(endpoint_id));
        self.post(&path, request).await
    }

    pub async fn get_first_list_of_published_nodes(
        &self,
        endpoint_id: &str,
        request: &PublishedItemListRequestApiModel,
    ) -> Result<PublishedItemListResponseApiModel, ClientError> {
        let path = format!("v2/publish/{}", segment(endpoint_id));
        self.post(&path, request).await
    }

    pub async fn get_next_list_of_published_nodes(
        &self,
        endpoint_id: &str,
        continuation_token: &str,
    ) -> Result<PublishedItemListResponseApiModel, ClientError> {
        let path = format!("v2/publish/{}", segment(endpoint_id));
        let bytes = self
            .client
            .send_json_bytes(
                Method::GET,
                &path,
                &[("continuationToken", continuation_token)],
                None,
            )
            .await?;
        decode(&bytes)
    }

    /// Follow continuation tokens until every published node has been read.
    pub async fn list_all_published_nodes(
        &self,
        endpoint_id: &str,
    ) -> Result<Vec<PublishedItemApiModel>, ClientError> {
        let mut page = self
            .get_first_list_of_published_nodes(endpoint_id, &Default::default())
            .await?;
        let mut items = Vec::new();
        loop {
            items.extend(page.items.take().unwrap_or_default());
            match page.continuation_token.take() {
                Some(token) => {
                    debug!(
                        "Fetching next page of endpoint {} ({} so far)",
                        endpoint_id,
                        items.len()
                    );
                    page = self
                        .get_next_list_of_published_nodes(endpoint_id, &token)
                        .await?;
                }
                None => return Ok(items),
            }
        }
    }

    /// Register a user to receive samples of an endpoint. Returns the
    /// registered user id, which the service assigns when none is given.
    pub async fn subscribe(
        &self,
        endpoint_id: &str,
        user_id: Option<&str>,
    ) -> Result<String, ClientError> {
        let path = format!("v2/monitor/{}/samples", segment(endpoint_id));
        let body = match user_id {
            Some(u) => Some(serde_json::to_vec(u).map_err(|source| {
                ClientError::Serialize(ModelError::Serialize {
                    model: "str",
                    source,
                })
            })?),
            None => None,
        };
        let bytes = self
            .client
            .send_json_bytes(Method::PUT, &path, &[], body)
            .await?;
        serde_json::from_slice(&bytes).map_err(|source| {
            ClientError::Deserialize(ModelError::Deserialize {
                model: "str",
                source,
            })
        })
    }

    pub async fn unsubscribe(&self, endpoint_id: &str, user_id: &str) -> Result<(), ClientError> {
        let path = format!(
            "v2/monitor/{}/samples/{}",
            segment(endpoint_id),
            segment(user_id)
        );
        self.client
            .send_json_bytes(Method::DELETE, &path, &[], None)
            .await?;
        Ok(())
    }

    async fn post<Req: ApiModel, Resp: ApiModel>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp, ClientError> {
        let body = request.to_vec().map_err(ClientError::Serialize)?;
        let bytes = self
            .client
            .send_json_bytes(Method::POST, path, &[], Some(body))
            .await?;
        decode(&bytes)
    }
}

fn decode<T: ApiModel>(bytes: &[u8]) -> Result<T, ClientError> {
    // An empty 200 body carries no fields; treat it like `{}`.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return T::from_slice(b"{}").map_err(ClientError::Deserialize);
    }
    T::from_slice(bytes).map_err(ClientError::Deserialize)
}

fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
