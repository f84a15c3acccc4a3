mod bootstrap;
mod chat;
mod health;
mod sessions;

use anyhow::Result;
use pixy_core::config::{AppConfig, LoadOptions};
use pixy_core::ApplicationError;

fn init_logging(config: &AppConfig) {
    use pixy_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Config is loaded exactly once; logging comes up before bootstrap so
    // bootstrap events are captured.
    let config = AppConfig::load(LoadOptions::default())
        .map_err(|error| ApplicationError::Configuration(error.to_string()))?;
    init_logging(&config);

    let app = bootstrap::bootstrap(config)?;

    let router = chat::router(chat::ChatState {
        registry: app.registry.clone(),
        pipeline: app.pipeline.clone(),
        config: app.config.clone(),
    })
    .merge(health::router(app.config.backup.path.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "pixy-server started"
    );

    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(
        event_name = "system.server.stopped",
        correlation_id = "shutdown",
        "pixy-server stopped"
    );

    Ok(())
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
