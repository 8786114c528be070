use anyhow::Context;
use axum::Router;
use batepapo::{AppState, messages, presence, store};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let db_url = dotenv::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:batepapo.db?mode=rwc".to_owned());
    let db_pool = store::connect(&db_url).await.context("opening the store")?;

    presence::sweep::spawn(db_pool.clone());

    let app = Router::new()
        .merge(presence::router())
        .merge(messages::router())
        .with_state(AppState { db_pool })
        .layer(CorsLayer::permissive());

    let port: u16 = dotenv::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
