use std::env;

use crate::game::constants::{DEFAULT_MAX_PLAYERS, DEFAULT_TICK_INTERVAL_MS};

/// Server configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Admission cap for seated players; extra connections queue.
    pub max_players: usize,
    /// Cadence of the table step function.
    pub tick_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            max_players: env::var("MAX_PLAYERS")
                .map(|v| v.parse().expect("MAX_PLAYERS must be a number"))
                .unwrap_or(DEFAULT_MAX_PLAYERS),
            tick_interval_ms: env::var("TICK_INTERVAL_MS")
                .map(|v| v.parse().expect("TICK_INTERVAL_MS must be a number"))
                .unwrap_or(DEFAULT_TICK_INTERVAL_MS),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
