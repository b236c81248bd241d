use std::future::Future;

use anyhow::Context;
use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StatusMapping;
use crate::routes::{self, ServerState};
use service::file::people_store::PeopleStore;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the person store named by the config and wrap it in handler state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    common::env::ensure_data_dir(&cfg.storage.path).await?;
    let store = PeopleStore::new(cfg.storage.path.clone()).await?;
    info!(path = %store.path().display(), "person store ready");
    Ok(ServerState::new(store, StatusMapping::from_strict(cfg.server.strict_status)))
}

/// Build the app for `cfg` without binding a socket.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Serve `app` on `listener` until `shutdown` resolves; in-flight requests finish first.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        addr = %listener.local_addr()?,
        db = %cfg.storage.path.display(),
        strict_status = cfg.server.strict_status,
        "server running"
    );
    serve(listener, app, shutdown).await
}
