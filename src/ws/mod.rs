pub mod game_server;
pub mod handler;
pub mod messages;
pub mod rate_limit;

pub use game_server::GameServer;
pub use handler::ws_handler;
