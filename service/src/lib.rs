//! Reference OPC Publisher REST service.
//!
//! Serves the publish and sample-monitoring operations over HTTP and keeps
//! published nodes and subscriptions in SQLite. Used as the test double for
//! the client SDK.

pub mod api;
pub mod db;
pub mod services;

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub use api::{create_router, AppState};

/// Serve the API on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let app = create_router(state);
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
