use std::time::Duration;

use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::messages::{self, MessageKind};
use crate::{BROADCAST, clock};

/// How often the eviction pass runs.
const SWEEP_EVERY: Duration = Duration::from_secs(15);
/// Idle time after which a participant counts as gone.
const STALE_AFTER_MS: i64 = 10_000;

/// Detached eviction task. Shares nothing with the request handlers but the
/// pool; failures are logged and the loop keeps going.
pub fn spawn(db_pool: SqlitePool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_EVERY);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            if let Err(err) = sweep(&db_pool, clock::now_millis()).await {
                tracing::error!(error = %err, "sweep pass failed");
            }
        }
    })
}

/// One eviction pass: every participant idle for `STALE_AFTER_MS` or longer
/// leaves the room. Evictions are independent, one failing does not stop
/// the rest.
pub async fn sweep(db_pool: &SqlitePool, now_ms: i64) -> Result<(), sqlx::Error> {
    let stale: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM participants WHERE last_status <= ?")
            .bind(now_ms - STALE_AFTER_MS)
            .fetch_all(db_pool)
            .await?;

    for (name,) in stale {
        if let Err(err) = evict(db_pool, &name).await {
            tracing::warn!(participant = %name, error = %err, "eviction failed");
        }
    }
    Ok(())
}

async fn evict(db_pool: &SqlitePool, name: &str) -> Result<(), sqlx::Error> {
    // departure notice first, then the record; a crash in between leaves a
    // stray notice, which is accepted
    messages::insert(db_pool, name, BROADCAST, "sai da sala...", MessageKind::Status).await?;
    sqlx::query("DELETE FROM participants WHERE name=?")
        .bind(name)
        .execute(db_pool)
        .await?;
    Ok(())
}
