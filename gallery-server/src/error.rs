use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gallery_core::LifecycleError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LifecycleError> for ServerError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Denied(reason) => ServerError::Forbidden(reason.to_string()),
            LifecycleError::NotFound(_) => ServerError::NotFound("Image not found".into()),
            LifecycleError::MissingSubject => {
                ServerError::Unauthorized("Caller identity has no subject".into())
            }
            LifecycleError::Invalid(msg) => ServerError::BadRequest(msg),
            LifecycleError::Auth(e) => ServerError::Internal(format!("Store error: {e}")),
            LifecycleError::Content(e) => ServerError::Internal(format!("Content error: {e}")),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
