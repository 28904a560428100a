use std::sync::Arc;

use anyhow::Context;

use storefront_infra::{ServerConfig, ShopService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ServerConfig::from_env()?;
    tracing::info!(data_dir = %config.store.data_dir.display(), "using data directory");

    let services = Arc::new(ShopService::from_config(&config.store));
    let app = storefront_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
