pub mod error;
pub mod monitor;
pub mod publish;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DbPool;

pub struct AppState {
    pub db: DbPool,
    /// Maximum number of items per published-nodes page.
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Publishing
        .route(
            "/v2/publish/:endpoint_id/start",
            post(publish::start_publishing_values),
        )
        .route(
            "/v2/publish/:endpoint_id/stop",
            post(publish::stop_publishing_values),
        )
        .route(
            "/v2/publish/:endpoint_id",
            post(publish::get_first_list_of_published_nodes)
                .get(publish::get_next_list_of_published_nodes),
        )
        // Sample monitoring
        .route("/v2/monitor/:endpoint_id/samples", put(monitor::subscribe))
        .route(
            "/v2/monitor/:endpoint_id/samples/:user_id",
            delete(monitor::unsubscribe),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health - Health check endpoint
async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use opc_publisher_models::{
        status, ApiModel, ErrorResponse, PublishStartResponseApiModel,
        PublishStopResponseApiModel, PublishedItemListResponseApiModel,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router(page_size: usize) -> (tempfile::TempDir, Router) {
        let (dir, db) = crate::db::test_pool();
        let router = create_router(Arc::new(AppState { db, page_size }));
        (dir, router)
    }

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, router) = test_router(10);
        let (status, body) = call(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({"status": "ok"})
        );
    }

    #[tokio::test]
    async fn test_start_returns_empty_object_on_success() {
        let (_dir, router) = test_router(10);
        let (status, body) = call(
            &router,
            Method::POST,
            "/v2/publish/ep1/start",
            Some(json!({"item": {"nodeId": "i=2258"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_start_reports_error_info_for_blank_node() {
        let (_dir, router) = test_router(10);
        let (status, body) = call(
            &router,
            Method::POST,
            "/v2/publish/ep1/start",
            Some(json!({"item": {"nodeId": ""}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let resp = PublishStartResponseApiModel::from_slice(&body).unwrap();
        assert_eq!(
            resp.error_info.unwrap().status_code,
            Some(status::BAD_NODE_ID_INVALID)
        );
    }

    #[tokio::test]
    async fn test_start_rejects_malformed_body() {
        let (_dir, router) = test_router(10);
        let (status, _) = call(
            &router,
            Method::POST,
            "/v2/publish/ep1/start",
            Some(json!({"item": "nope"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_stop_unknown_node() {
        let (_dir, router) = test_router(10);
        let (status, body) = call(
            &router,
            Method::POST,
            "/v2/publish/ep1/stop",
            Some(json!({"nodeId": "i=1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let resp = PublishStopResponseApiModel::from_slice(&body).unwrap();
        assert_eq!(
            resp.error_info.unwrap().status_code,
            Some(status::BAD_NODE_ID_UNKNOWN)
        );
    }

    #[tokio::test]
    async fn test_listing_pages_through_items() {
        let (_dir, router) = test_router(2);
        for i in 0..3 {
            call(
                &router,
                Method::POST,
                "/v2/publish/ep1/start",
                Some(json!({"item": {"nodeId": format!("i={}", i)}})),
            )
            .await;
        }

        let (_, body) = call(&router, Method::POST, "/v2/publish/ep1", Some(json!({}))).await;
        let first = PublishedItemListResponseApiModel::from_slice(&body).unwrap();
        assert_eq!(first.items.as_ref().unwrap().len(), 2);
        let token = first.continuation_token.unwrap();

        let (status, body) = call(
            &router,
            Method::GET,
            &format!("/v2/publish/ep1?continuationToken={}", token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let next = PublishedItemListResponseApiModel::from_slice(&body).unwrap();
        assert_eq!(next.items.unwrap()[0].node_id, "i=2");
        assert!(next.continuation_token.is_none());
    }

    #[tokio::test]
    async fn test_bad_continuation_token() {
        let (_dir, router) = test_router(2);
        let (status, body) = call(
            &router,
            Method::GET,
            "/v2/publish/ep1?continuationToken=%21%21",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error_code.as_deref(), Some("invalid_continuation_token"));

        let (status, _) = call(&router, Method::GET, "/v2/publish/ep1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_continuation_token() {
        let (_dir, router) = test_router(2);
        for i in 0..3 {
            call(
                &router,
                Method::POST,
                "/v2/publish/ep1/start",
                Some(json!({"item": {"nodeId": format!("i={}", i)}})),
            )
            .await;
        }

        let token = crate::services::continuation::encode(usize::MAX);
        let (status, body) = call(
            &router,
            Method::GET,
            &format!("/v2/publish/ep1?continuationToken={}", token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error_code.as_deref(), Some("invalid_continuation_token"));
    }

    #[tokio::test]
    async fn test_subscribe_and_unsubscribe() {
        let (_dir, router) = test_router(10);
        let (status, body) = call(
            &router,
            Method::PUT,
            "/v2/monitor/ep1/samples",
            Some(json!("alice")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<String>(&body).unwrap(), "alice");

        let (status, _) = call(
            &router,
            Method::DELETE,
            "/v2/monitor/ep1/samples/alice",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &router,
            Method::DELETE,
            "/v2/monitor/ep1/samples/alice",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error_code.as_deref(), Some("not_found"));
    }

    #[tokio::test]
    async fn test_subscribe_without_user_assigns_one() {
        let (_dir, router) = test_router(10);
        let (status, body) = call(&router, Method::PUT, "/v2/monitor/ep1/samples", None).await;
        assert_eq!(status, StatusCode::OK);
        let user_id: String = serde_json::from_slice(&body).unwrap();
        assert!(uuid::Uuid::parse_str(&user_id).is_ok());
    }
}
