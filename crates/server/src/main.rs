use anyhow::Context;
use gateway::GatewayClient;
use server::{AppState, config::Config, routes};
use services::services::{draft_store::FileDraftStore, editing_session::EditingSessionManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let gateway = GatewayClient::new(
        &config.gateway_url,
        &config.gateway_anon_key,
        &config.storage_bucket,
    )
    .context("building backend gateway client")?;

    let editing =
        EditingSessionManager::new(Box::new(FileDraftStore::new(&config.draft_store_path)));

    let addr = format!("{}:{}", config.host, config.port);
    let app = routes::router(AppState::new(gateway, editing));

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
