use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use opc_publisher_models::ErrorResponse;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(code, message.clone()))
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("not_found", message.clone()))
            }
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal", e.to_string()),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
