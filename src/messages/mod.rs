mod edit;
mod list;
mod post;

use axum::Router;
use axum::routing::{get, put};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppState, clock};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list::list).post(post::post))
        .route("/messages/{id}", put(edit::update).delete(edit::remove))
}

/// What a message is allowed to be on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Message,
    PrivateMessage,
    Status,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Message => "message",
            MessageKind::PrivateMessage => "private_message",
            MessageKind::Status => "status",
        }
    }

    /// Kinds clients may post; `status` is reserved for the room itself.
    pub fn parse_client(kind: &str) -> Option<Self> {
        match kind {
            "message" => Some(MessageKind::Message),
            "private_message" => Some(MessageKind::PrivateMessage),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: String,
    #[serde(rename = "from")]
    pub from_name: String,
    #[serde(rename = "to")]
    pub to_name: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

pub(crate) async fn insert(
    db_pool: &SqlitePool,
    from: &str,
    to: &str,
    text: &str,
    kind: MessageKind,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO messages (id,from_name,to_name,text,kind,time) VALUES (?,?,?,?,?,?)")
        .bind(Uuid::now_v7().to_string())
        .bind(from)
        .bind(to)
        .bind(text)
        .bind(kind.as_str())
        .bind(clock::wall_time())
        .execute(db_pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::join;
    use crate::{ApiError, BROADCAST, store};

    // the walkthrough from the original room: Alice joins twice, posts to
    // everyone, Bob reads it but cannot delete it
    #[tokio::test]
    async fn alice_and_bob() {
        let pool = store::memory().await;

        assert_eq!(join(&pool, "Alice").await.unwrap(), "Alice");
        assert!(matches!(join(&pool, "Alice").await, Err(ApiError::Conflict)));

        post::send(
            &pool,
            "Alice",
            post::MessageBody::new(BROADCAST, "hi", "message"),
        )
        .await
        .unwrap();

        let seen = list::visible_to(&pool, "Bob", None).await.unwrap();
        let public: Vec<_> = seen.iter().filter(|m| m.kind == "message").collect();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].text, "hi");
        let id = public[0].id.clone();

        assert!(matches!(
            edit::erase(&pool, &id, "Bob").await,
            Err(ApiError::Forbidden)
        ));
        assert_eq!(list::visible_to(&pool, "Bob", None).await.unwrap().len(), seen.len());
    }
}
