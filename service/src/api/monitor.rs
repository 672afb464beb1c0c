use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    api::{error::ApiError, AppState},
    db::execute_async,
    services::subscriptions,
};

/// PUT /v2/monitor/:endpoint_id/samples - Register a user for samples
///
/// The body is an optional JSON string with the user id. Without one a new id
/// is assigned. The registered id is returned.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Path(endpoint_id): Path<String>,
    body: Bytes,
) -> Result<Json<String>, ApiError> {
    let user_id = parse_user_id(&body)?.unwrap_or_else(|| Uuid::new_v4().to_string());

    let db = state.db.clone();
    let endpoint = endpoint_id.clone();
    let user = user_id.clone();
    let added = execute_async(&db, move |conn| {
        subscriptions::subscribe(conn, &endpoint, &user)
    })
    .await?;

    if added {
        info!("Subscribed: endpoint_id={}, user_id={}", endpoint_id, user_id);
    }

    Ok(Json(user_id))
}

/// DELETE /v2/monitor/:endpoint_id/samples/:user_id - Unregister a user
pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    Path((endpoint_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    info!("Unsubscribing: endpoint_id={}, user_id={}", endpoint_id, user_id);

    let db = state.db.clone();
    let endpoint = endpoint_id.clone();
    let user = user_id.clone();
    let removed = execute_async(&db, move |conn| {
        subscriptions::unsubscribe(conn, &endpoint, &user)
    })
    .await?;

    if !removed {
        return Err(ApiError::NotFound(format!(
            "User {} is not subscribed to endpoint {}",
            user_id, endpoint_id
        )));
    }

    Ok(StatusCode::OK)
}

fn parse_user_id(body: &[u8]) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let user_id: Option<String> =
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest {
            code: "invalid_body",
            message: format!("Expected a JSON string user id: {}", e),
        })?;
    Ok(user_id.filter(|u| !u.trim().is_empty()))
}
