//! HTTP listener lifecycle.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{error, info};

use super::handlers::AppState;
use super::routes::create_router;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metrics;

/// Bind `config.bind_addr()` and serve until `shutdown` resolves.
///
/// A bind failure returns `AppError::Io` before any connection is accepted.
/// When `state` carries a metrics handle, recorder upkeep runs alongside the
/// server and stops with it.
pub async fn serve<F>(config: &Config, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        AppError::from(e)
    })?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    let upkeep = state
        .metrics
        .clone()
        .map(|handle| metrics::spawn_upkeep(handle, metrics::UPKEEP_INTERVAL));

    let router = create_router(state, config);
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    if let Some(upkeep) = upkeep {
        upkeep.abort();
    }

    result?;
    info!("HTTP server stopped");
    Ok(())
}
