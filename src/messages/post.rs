use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, debug_handler};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{ApiError, ApiResult, User, presence, sanitize};

use super::MessageKind;

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    to: String,
    text: String,
    #[serde(rename = "type")]
    kind: String,
}

#[cfg(test)]
impl MessageBody {
    pub(crate) fn new(to: &str, text: &str, kind: &str) -> Self {
        Self {
            to: to.to_owned(),
            text: text.to_owned(),
            kind: kind.to_owned(),
        }
    }
}

/// Sanitized and validated fields of a client message.
pub(crate) struct CleanMessage {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

pub(crate) fn check(body: MessageBody) -> ApiResult<CleanMessage> {
    let to = sanitize::clean(&body.to);
    let text = sanitize::clean(&body.text);
    if to.is_empty() {
        return Err(ApiError::Validation("to must not be empty"));
    }
    if text.is_empty() {
        return Err(ApiError::Validation("text must not be empty"));
    }
    let kind = MessageKind::parse_client(sanitize::clean(&body.kind).as_str())
        .ok_or(ApiError::Validation("type must be message or private_message"))?;
    Ok(CleanMessage { to, text, kind })
}

#[debug_handler]
pub(crate) async fn post(
    State(db_pool): State<SqlitePool>,
    User(from): User,
    Json(body): Json<MessageBody>,
) -> ApiResult<Response> {
    send(&db_pool, &from, body).await?;
    Ok(StatusCode::CREATED.into_response())
}

pub(crate) async fn send(db_pool: &SqlitePool, from: &str, body: MessageBody) -> ApiResult<()> {
    let msg = check(body)?;
    if !presence::is_registered(db_pool, from).await? {
        return Err(ApiError::UnknownSender);
    }
    super::insert(db_pool, from, &msg.to, &msg.text, msg.kind).await?;
    Ok(())
}
