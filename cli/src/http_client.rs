use opc_publisher_models::ErrorResponse;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;

#[derive(Clone, Debug)]
pub enum Credential {
    Bearer(String),
    ApiKey(String),
}

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    credential: Option<Credential>,
    user_agent: String,
    retries: u32,
}

impl Client {
    pub fn new(
        base_url: &str,
        credential: Option<Credential>,
        timeout: Duration,
        retries: u32,
    ) -> Result<Self, ClientError> {
        // Relative joins replace the last segment unless the base ends in '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            http,
            credential,
            user_agent: format!("opcpub/{}", env!("CARGO_PKG_VERSION")),
            retries,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(path).map_err(|e| {
            ClientError::InvalidUrl(format!(
                "Failed to join base_url={} with path={}: {}",
                self.base_url, path, e
            ))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a request with an optional pre-encoded JSON body and return the
    /// raw response body of the first successful attempt.
    pub async fn send_json_bytes(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.build_url(path, query)?;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let req_id = Uuid::new_v4().to_string();
            let mut req = self.http.request(method.clone(), url.clone());
            req = req.header("user-agent", &self.user_agent);
            req = req.header("x-request-id", &req_id);

            if let Some(credential) = &self.credential {
                match credential {
                    Credential::Bearer(token) => {
                        req = req.header("authorization", format!("Bearer {}", token));
                    }
                    Credential::ApiKey(k) => {
                        req = req.header("x-api-key", k);
                    }
                }
            }

            if let Some(b) = &body {
                req = req
                    .header(CONTENT_TYPE, "application/json; charset=utf-8")
                    .body(b.clone());
            }

            debug!("HTTP {} {} (attempt {}, request_id={})", method, url, attempt, req_id);
            let resp = req.send().await?;
            let status = resp.status();

            if status.is_success() {
                let bytes = resp.bytes().await?;
                return Ok(bytes.to_vec());
            }

            // Try structured error, fallback to raw.
            let retry_after_header = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let bytes = resp.bytes().await.unwrap_or_default();
            let err = serde_json::from_slice::<ErrorResponse>(&bytes).ok();
            let body_text = String::from_utf8_lossy(&bytes).to_string();

            // Retry handling: 429 with Retry-After, and GET/DELETE on 5xx.
            if attempt <= self.retries && should_retry(&method, status) {
                let sleep_dur = retry_sleep(status, retry_after_header, err.as_ref());
                debug!(
                    "HTTP {} {} returned {}, retrying in {:?}",
                    method, url, status, sleep_dur
                );
                tokio::time::sleep(sleep_dur).await;
                continue;
            }

            return Err(ClientError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                error: err,
                body: body_text,
            });
        }
    }
}

fn should_retry(method: &Method, status: StatusCode) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    if status.is_server_error() {
        return matches!(*method, Method::GET | Method::DELETE);
    }
    false
}

fn retry_sleep(
    status: StatusCode,
    retry_after_header: Option<u64>,
    err: Option<&ErrorResponse>,
) -> Duration {
    if status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(s) = retry_after_header {
            return Duration::from_secs(s);
        }
        if let Some(s) = err.and_then(|e| e.retry_after) {
            return Duration::from_secs(s);
        }
        return Duration::from_secs(1);
    }
    Duration::from_millis(300)
}
