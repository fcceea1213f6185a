use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use docs_gateway::{registry, routes, AppState, DocsConfig, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docs_gateway=debug,tower_http=debug")),
        )
        .init();

    let settings = Settings::from_env().context("invalid settings")?;
    let config = DocsConfig::from_settings(&settings).context("invalid documentation config")?;
    let config = registry::global().install(config)?;
    for source in config.sources() {
        tracing::info!("Documentation source {} -> {}", source.name, source.url);
    }

    let state = AppState::from_settings(config, &settings)?;
    let app = routes(state, &settings.cors_allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Starting docs gateway at {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
