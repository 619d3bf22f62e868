use blackjack_server::{config, create_app, ws};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load config
    let config = config::Config::from_env();
    tracing::info!("Starting blackjack server on {}", config.server_addr());

    // Create the game server around the single shared table
    let game_server = Arc::new(ws::GameServer::new(&config));

    // Build router using lib function
    let app = create_app(game_server.clone());

    // Spawn the table driver: one step per tick interval
    let driver = game_server.clone();
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_interval);
        loop {
            interval.tick().await;
            driver.tick().await;
        }
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server_addr()).await?;
    tracing::info!("Server listening on {}", config.server_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
