use crate::{
    config::Config,
    game::{
        constants::{BROADCAST_CHANNEL_CAPACITY, GUEST_NAMES},
        table::{GameSnapshot, Table, TableConfig, TableEvent},
        Player,
    },
    ws::messages::ServerMessage,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Owns the single shared table and fans table events out to every
/// connected socket. All table mutation goes through the write lock, so one
/// mutation is in flight at a time.
pub struct GameServer {
    table: RwLock<Table>,
    events: broadcast::Sender<ServerMessage>,
    next_guest_idx: AtomicUsize,
}

impl GameServer {
    pub fn new(config: &Config) -> Self {
        let table = Table::new(TableConfig {
            max_players: config.max_players,
            ..TableConfig::default()
        });
        let (tx, _rx) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);
        Self {
            table: RwLock::new(table),
            events: tx,
            next_guest_idx: AtomicUsize::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.events.subscribe()
    }

    fn notify(&self, message: ServerMessage) {
        // Nobody listening is fine.
        let _ = self.events.send(message);
    }

    /// One step of the game. Called on a fixed cadence by the driver task
    /// in `main`; broadcasts the resulting event, if the step produced one.
    pub async fn tick(&self) {
        let mut table = self.table.write().await;
        let Some(event) = table.tick() else {
            return;
        };
        let game_state = table.snapshot();
        drop(table);

        tracing::debug!("Broadcasting {:?}", event);
        self.notify(match event {
            TableEvent::Starting => ServerMessage::Starting { game_state },
            TableEvent::Turn => ServerMessage::Turn { game_state },
            TableEvent::DealerReveal => ServerMessage::DealerReveal { game_state },
            TableEvent::Dealing => ServerMessage::Dealing { game_state },
            TableEvent::Comparing => ServerMessage::Comparing { game_state },
            TableEvent::Finished => ServerMessage::Finished { game_state },
        });
    }

    /// Admits a new connection, seating or queueing it. Returns the new
    /// player's id and the direct reply for that connection; sockets already
    /// at the table get a bare arrival notice.
    pub async fn join(&self, name: Option<String>) -> (String, ServerMessage) {
        let id = Uuid::new_v4().to_string();
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.guest_name());
        let player = Player::new(id.clone(), name.clone());

        let mut table = self.table.write().await;
        let seated = table.join(player);
        let current_player = table
            .players
            .iter()
            .chain(table.waiting.iter())
            .find(|p| p.id == id)
            .map(|p| table.player_view(p))
            .expect("admitted player is seated or queued");
        let game_state = table.snapshot();
        drop(table);

        if seated {
            tracing::info!("{} is joining the table", name);
            self.notify(ServerMessage::PlayerJoining);
            (
                id,
                ServerMessage::Joining {
                    current_player,
                    game_state,
                },
            )
        } else {
            tracing::info!("{} is waiting in the queue", name);
            self.notify(ServerMessage::PlayerWaiting);
            (
                id,
                ServerMessage::Waiting {
                    current_player,
                    game_state,
                },
            )
        }
    }

    /// Disconnection: the table marks the player as departed and handles
    /// any turn or round fallout itself.
    pub async fn leave(&self, player_id: &str) {
        let mut table = self.table.write().await;
        if table.leave(player_id) {
            tracing::info!("Player {} left the game", player_id);
        }
    }

    pub async fn hit(&self, player_id: &str) {
        let mut table = self.table.write().await;
        let Some(card) = table.apply_hit(player_id) else {
            return;
        };
        let name = table
            .players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player_id.to_string());
        let game_state = table.snapshot();
        drop(table);

        tracing::info!("{} hits a {}", name, card);
        self.notify(ServerMessage::Hit { game_state });
    }

    pub async fn stick(&self, player_id: &str) {
        let mut table = self.table.write().await;
        if !table.apply_stick(player_id) {
            return;
        }
        let name = table
            .players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player_id.to_string());
        let game_state = table.snapshot();
        drop(table);

        tracing::info!("{} sticks", name);
        self.notify(ServerMessage::Stick { game_state });
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.table.read().await.snapshot()
    }

    fn guest_name(&self) -> String {
        let idx = self.next_guest_idx.fetch_add(1, Ordering::Relaxed);
        let base = GUEST_NAMES[idx % GUEST_NAMES.len()];
        if idx < GUEST_NAMES.len() {
            base.to_string()
        } else {
            format!("{} {}", base, idx / GUEST_NAMES.len() + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            max_players: 7,
            tick_interval_ms: 700,
        }
    }

    #[tokio::test]
    async fn test_join_seats_the_first_connection() {
        let server = GameServer::new(&test_config());
        let (id, reply) = server.join(Some("Ada".to_string())).await;

        match reply {
            ServerMessage::Joining {
                current_player,
                game_state,
            } => {
                assert_eq!(current_player.id, id);
                assert_eq!(current_player.name, "Ada");
                assert_eq!(current_player.position, 0);
                assert_eq!(game_state.players.len(), 1);
            }
            other => panic!("expected a joining reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_join_without_name_gets_a_guest_name() {
        let server = GameServer::new(&test_config());
        let (_, reply) = server.join(None).await;

        match reply {
            ServerMessage::Joining { current_player, .. } => {
                assert!(!current_player.name.is_empty());
            }
            other => panic!("expected a joining reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_out_of_turn_hit_broadcasts_nothing() {
        let server = GameServer::new(&test_config());
        let (id, _) = server.join(None).await;

        let mut rx = server.subscribe();
        server.hit(&id).await; // table is still waiting, not this player's turn

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_second_connection_sees_an_arrival_notice() {
        let server = GameServer::new(&test_config());
        let (_, _) = server.join(None).await;

        let mut rx = server.subscribe();
        let (_, reply) = server.join(None).await;
        assert!(matches!(reply, ServerMessage::Joining { .. }));
        assert!(matches!(rx.try_recv(), Ok(ServerMessage::PlayerJoining)));
    }
}
