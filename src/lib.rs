//! Blackjack Table Server Library
//!
//! This module exposes the engine and transport components for integration
//! testing.

pub mod config;
pub mod game;
pub mod ws;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Creates the application router with all endpoints
pub fn create_app(game_server: Arc<ws::GameServer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Blackjack Server" }))
        .route("/health", get(|| async { "OK" }))
        .route("/ws", get(ws::ws_handler).with_state(game_server))
        .layer(cors)
}
