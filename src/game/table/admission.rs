use super::*;

impl Table {
    /// Seats the player immediately when a seat is free and the table is
    /// between rounds; otherwise queues them. Returns whether the player
    /// got a seat.
    pub fn join(&mut self, mut player: Player) -> bool {
        let between_rounds = matches!(
            self.state,
            TableState::Waiting | TableState::Restarting
        );
        if self.players.len() >= self.max_players || !between_rounds {
            player.wait();
            tracing::info!(
                "{} queued ({} now waiting)",
                player.name,
                self.waiting.len() + 1
            );
            self.waiting.push_back(player);
            false
        } else {
            let seat = self.players.len();
            player.join(seat);
            tracing::info!("{} seated at position {}", player.name, seat);
            self.players.push(player);
            true
        }
    }

    /// Marks a participant as departed. A departed seat is only reclaimed at
    /// round assembly; a departing active player forfeits their turn right
    /// away, and the table resets when nobody connected remains seated.
    pub fn leave(&mut self, player_id: &str) -> bool {
        if let Some(seat) = self.players.iter().position(|p| p.id == player_id) {
            let was_active = self.is_turn_of(player_id);
            self.players[seat].leave();
            tracing::info!("{} left seat {}", self.players[seat].name, seat);

            if self.connected_seated() == 0 {
                tracing::info!("No connected players remain, resetting the table");
                self.reset_to_waiting();
            } else if was_active {
                self.end_turn();
            }
            return true;
        }

        if let Some(idx) = self.waiting.iter().position(|p| p.id == player_id) {
            if let Some(player) = self.waiting.remove(idx) {
                tracing::info!("{} left the queue", player.name);
            }
            return true;
        }

        false
    }
}
