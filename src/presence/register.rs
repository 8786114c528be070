use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, debug_handler};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::messages::{self, MessageKind};
use crate::{ApiError, ApiResult, BROADCAST, clock, sanitize};

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterBody {
    name: String,
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    Json(RegisterBody { name }): Json<RegisterBody>,
) -> ApiResult<Response> {
    let name = join(&db_pool, &name).await?;
    Ok((StatusCode::CREATED, Json(json!({ "name": name }))).into_response())
}

/// Adds a participant and announces the arrival to the room. Returns the
/// normalized name actually stored.
pub async fn join(db_pool: &SqlitePool, raw_name: &str) -> ApiResult<String> {
    let name = sanitize::clean(raw_name);
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty"));
    }

    if super::is_registered(db_pool, &name).await? {
        return Err(ApiError::Conflict);
    }

    sqlx::query("INSERT INTO participants (name,last_status) VALUES (?,?)")
        .bind(&name)
        .bind(clock::now_millis())
        .execute(db_pool)
        .await?;
    messages::insert(db_pool, &name, BROADCAST, "entra na sala...", MessageKind::Status).await?;

    Ok(name)
}
