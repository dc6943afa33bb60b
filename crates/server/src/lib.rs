//! HTTP surface of the ridership dashboard.
//!
//! `GET /` serves the dashboard page; the three `POST /api/*` endpoints run
//! the view handlers against the shared dataset snapshot for the selection
//! in the request body.

pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use error::{ApiError, Error};
pub use state::AppState;

pub type Result<T> = std::result::Result<T, Error>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/routes", get(handlers::routes))
        .route("/api/table", post(handlers::table))
        .route("/api/route-map", post(handlers::route_map))
        .route("/api/segment-map", post(handlers::segment_map))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the dashboard on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("serving ridership dashboard at http://{addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
