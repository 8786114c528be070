pub mod clock;
pub mod error;
pub mod messages;
pub mod presence;
pub mod sanitize;
pub mod store;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::SqlitePool;

pub use error::{ApiError, ApiResult};

/// Broadcast target every client understands.
pub const BROADCAST: &str = "Todos";

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// Caller identity, taken from the `user` request header.
pub struct User(pub String);

impl<S: Send + Sync> FromRequestParts<S> for User {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("user")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| User(name.to_owned()))
            .ok_or(ApiError::Validation("missing user header"))
    }
}
