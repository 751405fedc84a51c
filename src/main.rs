use anyhow::Result;
use steam_predictor::{
    config,
    logging::{self, LogFormat},
    server,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.server.logs.level, LogFormat::Json) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Steam predictor server with log level: {}",
        config.server.logs.level
    );
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
