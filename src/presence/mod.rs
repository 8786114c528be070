mod register;
mod status;
pub mod sweep;

use axum::Router;
use axum::routing::post;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::AppState;

pub use register::join;
pub use status::touch;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", post(register::register).get(status::list))
        .route("/status", post(status::heartbeat))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Participant {
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

pub(crate) async fn is_registered(db_pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    Ok(
        sqlx::query_as::<_, (String,)>("SELECT name FROM participants WHERE name=?")
            .bind(name)
            .fetch_optional(db_pool)
            .await?
            .is_some(),
    )
}
