use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, debug_handler};
use sqlx::SqlitePool;

use crate::{ApiError, ApiResult, User, presence};

use super::post::{MessageBody, check};

#[debug_handler]
pub(crate) async fn update(
    State(db_pool): State<SqlitePool>,
    Path(id): Path<String>,
    User(requester): User,
    Json(body): Json<MessageBody>,
) -> ApiResult<Response> {
    rewrite(&db_pool, &id, &requester, body).await?;
    Ok(().into_response())
}

pub(crate) async fn rewrite(
    db_pool: &SqlitePool,
    id: &str,
    requester: &str,
    body: MessageBody,
) -> ApiResult<()> {
    let msg = check(body)?;
    if !presence::is_registered(db_pool, requester).await? {
        return Err(ApiError::UnknownSender);
    }
    ensure_author(db_pool, id, requester).await?;

    // from stays the requester, time keeps the original stamp
    sqlx::query("UPDATE messages SET to_name=?, text=?, kind=? WHERE id=?")
        .bind(&msg.to)
        .bind(&msg.text)
        .bind(msg.kind.as_str())
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(())
}

#[debug_handler]
pub(crate) async fn remove(
    State(db_pool): State<SqlitePool>,
    Path(id): Path<String>,
    User(requester): User,
) -> ApiResult<Response> {
    erase(&db_pool, &id, &requester).await?;
    Ok(().into_response())
}

pub(crate) async fn erase(db_pool: &SqlitePool, id: &str, requester: &str) -> ApiResult<()> {
    ensure_author(db_pool, id, requester).await?;
    sqlx::query("DELETE FROM messages WHERE id=?")
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(())
}

async fn ensure_author(db_pool: &SqlitePool, id: &str, requester: &str) -> ApiResult<()> {
    let Some((author,)): Option<(String,)> =
        sqlx::query_as("SELECT from_name FROM messages WHERE id=?")
            .bind(id)
            .fetch_optional(db_pool)
            .await?
    else {
        return Err(ApiError::NotFound);
    };

    if author != requester {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::list::visible_to;
    use crate::messages::post::send;
    use crate::presence::join;
    use crate::store;

    async fn one_message(pool: &SqlitePool) -> String {
        join(pool, "Alice").await.unwrap();
        send(pool, "Alice", MessageBody::new("Todos", "original", "message"))
            .await
            .unwrap();
        let (id,): (String,) =
            sqlx::query_as("SELECT id FROM messages WHERE kind='message'")
                .fetch_one(pool)
                .await
                .unwrap();
        id
    }

    #[tokio::test]
    async fn non_author_cannot_touch_it() {
        let pool = store::memory().await;
        let id = one_message(&pool).await;
        join(&pool, "Bob").await.unwrap();

        let err = rewrite(&pool, &id, "Bob", MessageBody::new("Todos", "hacked", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
        assert!(matches!(erase(&pool, &id, "Bob").await, Err(ApiError::Forbidden)));

        let (text,): (String,) = sqlx::query_as("SELECT text FROM messages WHERE id=?")
            .bind(&id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(text, "original");
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let pool = store::memory().await;
        join(&pool, "Alice").await.unwrap();

        let err = rewrite(&pool, "nope", "Alice", MessageBody::new("Todos", "x", "message"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert!(matches!(erase(&pool, "nope", "Alice").await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn author_update_keeps_from_and_time() {
        let pool = store::memory().await;
        let id = one_message(&pool).await;

        let (time_before,): (String,) = sqlx::query_as("SELECT time FROM messages WHERE id=?")
            .bind(&id)
            .fetch_one(&pool)
            .await
            .unwrap();

        rewrite(&pool, &id, "Alice", MessageBody::new("Bob", "edited", "private_message"))
            .await
            .unwrap();

        let (from, to, text, kind, time): (String, String, String, String, String) =
            sqlx::query_as("SELECT from_name,to_name,text,kind,time FROM messages WHERE id=?")
                .bind(&id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(from, "Alice");
        assert_eq!(to, "Bob");
        assert_eq!(text, "edited");
        assert_eq!(kind, "private_message");
        assert_eq!(time, time_before);
    }

    #[tokio::test]
    async fn author_delete_removes_it() {
        let pool = store::memory().await;
        let id = one_message(&pool).await;

        erase(&pool, &id, "Alice").await.unwrap();

        let seen = visible_to(&pool, "Alice", None).await.unwrap();
        assert!(!seen.iter().any(|m| m.id == id));
    }
}
