mod db;
mod error;
mod requests;
mod services;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use adkit_core::{config, logging};

use crate::db::Db;

fn router(db: Db) -> Router {
    // The catalog front-end is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/requests", get(requests::list).post(requests::create))
        .route("/api/requests/:id/like", post(requests::toggle_like))
        .route(
            "/api/requests/:id/likes/:client_id",
            get(requests::like_status),
        )
        .route(
            "/api/printing-services",
            get(services::list).post(services::register),
        )
        .layer(cors)
        .with_state(db)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging_stderr();
    let cfg = config::load_or_init()?;
    let server_cfg = cfg.server();

    // PORT mirrors the original deployment; the config file is the usual way.
    let bind_addr = match std::env::var("PORT") {
        Ok(port) => format!("127.0.0.1:{port}"),
        Err(_) => server_cfg.bind_addr.clone(),
    };

    let db = match &server_cfg.db_path {
        Some(path) => Db::open_at(path).await?,
        None => Db::open_default().await?,
    };

    let app = router(db);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("bind {bind_addr}"))?;
    tracing::info!("listings server on http://{bind_addr}");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
