mod routes;
mod state;
mod woocommerce;

use anyhow::{Context, Result};
use crm_core::config::CrmConfig;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CrmConfig::load().context("Failed to load crm configuration")?;
    let port = config.port;

    if config.credentials().is_err() {
        tracing::warn!("WooCommerce credentials are not configured; /sync-products will answer 400");
    }

    let app = routes::app(AppState::new(config));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("crm-server v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
