use axum::{
    extract::{Path, Query, State},
    Json,
};
use opc_publisher_models::{
    status, PublishStartRequestApiModel, PublishStartResponseApiModel, PublishStopRequestApiModel,
    PublishStopResponseApiModel, PublishedItemApiModel, PublishedItemListRequestApiModel,
    PublishedItemListResponseApiModel, ServiceResultApiModel,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::{error::ApiError, AppState},
    db::execute_async,
    services::{continuation, published_items},
};

#[derive(Debug, Deserialize)]
pub struct NextPageQuery {
    #[serde(rename = "continuationToken")]
    pub continuation_token: Option<String>,
}

/// POST /v2/publish/:endpoint_id/start - Start publishing a node
pub async fn start_publishing_values(
    State(state): State<Arc<AppState>>,
    Path(endpoint_id): Path<String>,
    Json(req): Json<PublishStartRequestApiModel>,
) -> Result<Json<PublishStartResponseApiModel>, ApiError> {
    info!(
        "Start publishing: endpoint_id={}, node_id={}",
        endpoint_id, req.item.node_id
    );

    if let Some(error_info) = validate_item(&req.item) {
        info!(
            "Rejected publish request for endpoint {}: {:?}",
            endpoint_id, error_info.error_message
        );
        return Ok(Json(PublishStartResponseApiModel::new(Some(error_info))));
    }

    let db = state.db.clone();
    let item = req.item;
    execute_async(&db, move |conn| {
        published_items::publish(conn, &endpoint_id, &item)
    })
    .await?;

    Ok(Json(PublishStartResponseApiModel::default()))
}

/// POST /v2/publish/:endpoint_id/stop - Stop publishing a node
pub async fn stop_publishing_values(
    State(state): State<Arc<AppState>>,
    Path(endpoint_id): Path<String>,
    Json(req): Json<PublishStopRequestApiModel>,
) -> Result<Json<PublishStopResponseApiModel>, ApiError> {
    info!(
        "Stop publishing: endpoint_id={}, node_id={}",
        endpoint_id, req.node_id
    );

    let db = state.db.clone();
    let node_id = req.node_id.clone();
    let removed = execute_async(&db, move |conn| {
        published_items::unpublish(conn, &endpoint_id, &node_id)
    })
    .await?;

    if !removed {
        return Ok(Json(PublishStopResponseApiModel::new(Some(
            ServiceResultApiModel::error(
                status::BAD_NODE_ID_UNKNOWN,
                format!("Node {} is not published", req.node_id),
            ),
        ))));
    }

    Ok(Json(PublishStopResponseApiModel::default()))
}

/// POST /v2/publish/:endpoint_id - First page of published nodes
pub async fn get_first_list_of_published_nodes(
    State(state): State<Arc<AppState>>,
    Path(endpoint_id): Path<String>,
    Json(req): Json<PublishedItemListRequestApiModel>,
) -> Result<Json<PublishedItemListResponseApiModel>, ApiError> {
    list_published_nodes(&state, endpoint_id, req.continuation_token).await
}

/// GET /v2/publish/:endpoint_id?continuationToken= - Next page of published nodes
pub async fn get_next_list_of_published_nodes(
    State(state): State<Arc<AppState>>,
    Path(endpoint_id): Path<String>,
    Query(query): Query<NextPageQuery>,
) -> Result<Json<PublishedItemListResponseApiModel>, ApiError> {
    let token = query.continuation_token.ok_or_else(|| ApiError::BadRequest {
        code: "missing_continuation_token",
        message: "continuationToken query parameter is required".to_string(),
    })?;
    list_published_nodes(&state, endpoint_id, Some(token)).await
}

async fn list_published_nodes(
    state: &AppState,
    endpoint_id: String,
    token: Option<String>,
) -> Result<Json<PublishedItemListResponseApiModel>, ApiError> {
    let offset = match token.as_deref() {
        None => 0,
        Some(t) => continuation::decode(t).ok_or_else(|| ApiError::BadRequest {
            code: "invalid_continuation_token",
            message: format!("Invalid continuation token: {}", t),
        })?,
    };
    let page_size = state.page_size;

    debug!(
        "Listing published nodes: endpoint_id={}, offset={}, page_size={}",
        endpoint_id, offset, page_size
    );

    let db = state.db.clone();
    let (items, has_more) = execute_async(&db, move |conn| {
        published_items::list_page(conn, &endpoint_id, offset, page_size)
    })
    .await?;

    let continuation_token = if has_more {
        let next = offset
            .checked_add(items.len())
            .ok_or_else(|| anyhow::anyhow!("Listing offset overflow at {}", offset))?;
        Some(continuation::encode(next))
    } else {
        None
    };

    Ok(Json(PublishedItemListResponseApiModel {
        items: Some(items),
        continuation_token,
    }))
}

fn validate_item(item: &PublishedItemApiModel) -> Option<ServiceResultApiModel> {
    if item.node_id.trim().is_empty() {
        return Some(ServiceResultApiModel::error(
            status::BAD_NODE_ID_INVALID,
            "Node id must not be empty",
        ));
    }
    let negative = [
        ("publishingInterval", item.publishing_interval),
        ("samplingInterval", item.sampling_interval),
    ]
    .into_iter()
    .find(|(_, v)| matches!(v, Some(v) if *v < 0));
    if let Some((name, value)) = negative {
        return Some(
            ServiceResultApiModel::error(
                status::BAD_INVALID_ARGUMENT,
                format!("{} must not be negative", name),
            )
            .with_diagnostics(serde_json::json!({ name: value })),
        );
    }
    None
}
