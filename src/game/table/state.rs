use serde::{Deserialize, Serialize};

use super::*;
use crate::game::player::PlayerStats;

/// Wire-facing view of the shared game state. Card strings come from the
/// cards' own rendering, so a face-down card serializes as the opaque
/// placeholder and never leaks rank or suit to any observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Seat of the player currently deciding, -1 when nobody is.
    pub active_player_position: i64,
    pub max_players: usize,
    pub current_state: String,
    pub waiting: Vec<PlayerView>,
    pub dealer: DealerView,
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerView {
    pub cards: Vec<String>,
    pub current_state: String,
}

/// A single participant as every client sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: String,
    pub active: bool,
    pub cards: Vec<String>,
    pub current_state: String,
    pub name: String,
    /// Seat index, -1 while unseated.
    pub position: i64,
    pub stats: PlayerStats,
}

impl Table {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            active_player_position: self.active_position.map_or(-1, |pos| pos as i64),
            max_players: self.max_players,
            current_state: self.state.to_string(),
            waiting: self.waiting.iter().map(|p| self.player_view(p)).collect(),
            dealer: DealerView {
                cards: self.dealer.hand.iter().map(|c| c.to_string()).collect(),
                current_state: self.dealer.state.to_string(),
            },
            players: self.players.iter().map(|p| self.player_view(p)).collect(),
        }
    }

    pub fn player_view(&self, player: &Player) -> PlayerView {
        PlayerView {
            id: player.id.clone(),
            active: player.position.is_some() && player.position == self.active_position,
            cards: player.hand.iter().map(|c| c.to_string()).collect(),
            current_state: player.state.to_string(),
            name: player.name.clone(),
            position: player.position.map_or(-1, |pos| pos as i64),
            stats: player.stats,
        }
    }
}
