//! projects-api server: reads configuration from the environment and serves until Ctrl-C.

use projects_api::{Server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("projects_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let server = Server::start(&config).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    server.shutdown().await?;
    Ok(())
}
