use crate::error::DashboardError;
use crate::util::open_in_browser;
use ridership_core::{config::DashboardConfig, Dataset};
use ridership_server::{shutdown_signal, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Serves the dashboard for `dataset` until Ctrl-C. Returns the shared state
/// so the caller can export the initial layout afterwards.
pub async fn serve(
    config: &DashboardConfig,
    dataset: Dataset,
    open_browser: bool,
) -> Result<Arc<AppState>, DashboardError> {
    info!(
        routes = dataset.routes().len(),
        stops = dataset.len(),
        "ridership data ready"
    );
    let state = Arc::new(AppState::new(dataset, config.map.to_owned())?);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| DashboardError::Bind {
            addr: addr.to_owned(),
            source,
        })?;

    if open_browser {
        open_in_browser(&format!("http://{}", listener.local_addr()?));
    }

    ridership_server::serve(listener, state.clone(), shutdown_signal()).await?;
    Ok(state)
}
