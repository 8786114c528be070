use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Json, debug_handler};
use sqlx::SqlitePool;

use crate::{ApiError, ApiResult, User, clock};

use super::Participant;

#[debug_handler]
pub(crate) async fn heartbeat(
    State(db_pool): State<SqlitePool>,
    User(name): User,
) -> ApiResult<Response> {
    touch(&db_pool, &name).await?;
    Ok(().into_response())
}

/// Refreshes the liveness stamp of a registered participant.
pub async fn touch(db_pool: &SqlitePool, name: &str) -> ApiResult<()> {
    let updated = sqlx::query("UPDATE participants SET last_status=? WHERE name=?")
        .bind(clock::now_millis())
        .bind(name)
        .execute(db_pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

#[debug_handler]
pub(crate) async fn list(
    State(db_pool): State<SqlitePool>,
) -> ApiResult<Json<Vec<Participant>>> {
    let participants =
        sqlx::query_as("SELECT name,last_status FROM participants ORDER BY rowid")
            .fetch_all(&db_pool)
            .await?;
    Ok(Json(participants))
}
