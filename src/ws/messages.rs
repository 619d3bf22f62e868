use crate::game::table::{GameSnapshot, PlayerView};
use serde::{Deserialize, Serialize};

/// Intents a connected player can send. Joining and leaving are implicit in
/// the connection lifecycle, not messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Hit,
    Stick,
    GetTableState,
    Ping,
}

/// Events broadcast to connected clients. Every game event carries a full
/// state snapshot; `joining`/`waiting` additionally carry the admitted
/// player's own view of themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[allow(clippy::large_enum_variant)] // snapshot-carrying events are the common case
pub enum ServerMessage {
    /// Direct reply to a connection that got a seat.
    Joining {
        current_player: PlayerView,
        game_state: GameSnapshot,
    },
    /// Direct reply to a connection that was queued.
    Waiting {
        current_player: PlayerView,
        game_state: GameSnapshot,
    },
    /// Bare notices for the rest of the table when someone arrives.
    PlayerJoining,
    PlayerWaiting,
    Starting { game_state: GameSnapshot },
    Turn { game_state: GameSnapshot },
    Hit { game_state: GameSnapshot },
    Stick { game_state: GameSnapshot },
    DealerReveal { game_state: GameSnapshot },
    Dealing { game_state: GameSnapshot },
    Comparing { game_state: GameSnapshot },
    Finished { game_state: GameSnapshot },
    TableState { game_state: GameSnapshot },
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Table, TableConfig};

    #[test]
    fn test_client_message_tags() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"hit"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Hit));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"getTableState"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::GetTableState));
    }

    #[test]
    fn test_server_message_event_tags() {
        let table = Table::new(TableConfig::default());
        let message = ServerMessage::DealerReveal {
            game_state: table.snapshot(),
        };

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains(r#""type":"dealerReveal""#));
        assert!(json.contains(r#""activePlayerPosition":-1"#));
        assert!(json.contains(r#""maxPlayers""#));
    }

    #[test]
    fn test_join_reply_carries_player_view() {
        let mut table = Table::new(TableConfig::default());
        table.join(crate::game::Player::new("p0".to_string(), "Ada".to_string()));

        let view = table.player_view(&table.players[0]);
        let message = ServerMessage::Joining {
            current_player: view,
            game_state: table.snapshot(),
        };

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains(r#""type":"joining""#));
        assert!(json.contains(r#""currentPlayer""#));
        assert!(json.contains(r#""name":"Ada""#));
    }
}
