use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with, mapped onto a bare status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("name already taken")]
    Conflict,
    #[error("no such participant or message")]
    NotFound,
    #[error("caller is not the author")]
    Forbidden,
    #[error("sender is not in the room")]
    UnknownSender,
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(reason) => {
                tracing::debug!(%reason, "rejected input");
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::UnknownSender => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::UNAUTHORIZED,
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Other(err) => {
                tracing::error!(error = %err, "unexpected failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // bare status, nothing internal crosses the wire
        status.into_response()
    }
}
