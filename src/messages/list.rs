use axum::extract::{Query, State};
use axum::{Json, debug_handler};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{ApiResult, User};

use super::Message;

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    limit: Option<usize>,
}

#[debug_handler]
pub(crate) async fn list(
    State(db_pool): State<SqlitePool>,
    User(requester): User,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Message>>> {
    Ok(Json(visible_to(&db_pool, &requester, query.limit).await?))
}

/// Messages `viewer` may see, oldest first. Public and status messages are
/// visible to everyone, private ones only to their two ends. With a limit,
/// only the most recent visible messages survive, order preserved.
pub async fn visible_to(
    db_pool: &SqlitePool,
    viewer: &str,
    limit: Option<usize>,
) -> Result<Vec<Message>, sqlx::Error> {
    let mut messages: Vec<Message> = sqlx::query_as(
        "SELECT id,from_name,to_name,text,kind,time FROM messages \
         WHERE kind IN ('message','status') OR from_name=? OR to_name=? \
         ORDER BY seq",
    )
    .bind(viewer)
    .bind(viewer)
    .fetch_all(db_pool)
    .await?;

    if let Some(limit) = limit {
        if messages.len() > limit {
            messages.drain(..messages.len() - limit);
        }
    }
    Ok(messages)
}
