use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Opens the long-lived pool shared by the handlers and the sweeper, and
/// makes sure the two collections exist.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(url)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS participants (
            name TEXT PRIMARY KEY,
            last_status INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    // seq is the canonical insertion order, id the opaque handle clients see
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS messages (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            from_name TEXT NOT NULL,
            to_name TEXT NOT NULL,
            text TEXT NOT NULL,
            kind TEXT NOT NULL,
            time TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Single-connection pool: every fresh SQLite `:memory:` connection is its
/// own empty database.
#[cfg(test)]
pub async fn memory() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
