//! Benefits allocation API server.
//!
//! Reads the program configuration from `BENEFITS_CONFIG_DIR` (default
//! `./config/default`) and listens on `BENEFITS_BIND_ADDR` (default
//! `127.0.0.1:3000`).

use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use benefits_engine::api::{AppState, create_router};
use benefits_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benefits_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("BENEFITS_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        program = %config.program().name,
        version = %config.program().version,
        template_sets = config.config().template_sets().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = env::var("BENEFITS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
