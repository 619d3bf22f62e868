use super::*;

impl Table {
    /// A hit from this player: one face-up card from the deck into their
    /// hand. Out-of-turn requests are ignored without touching any state.
    /// Returns the dealt card when the action was applied.
    pub fn apply_hit(&mut self, player_id: &str) -> Option<Card> {
        if !self.is_turn_of(player_id) {
            tracing::debug!("Ignoring hit from {}: not their turn", player_id);
            return None;
        }
        let seat = self.active_position?;

        let mut card = match self.deck.deal() {
            Ok(card) => card,
            Err(e) => {
                tracing::error!("Cannot deal a hit to {}: {}", player_id, e);
                return None;
            }
        };
        card.set_visible(true);
        self.players[seat].receive(card);

        let score = self.players[seat].score();
        if score > BUST_THRESHOLD {
            tracing::info!("{} busts at {}", self.players[seat].name, score);
            self.players[seat].bust();
            self.end_turn();
        }
        Some(card)
    }

    /// A stick from this player: no more cards, turn over. Returns whether
    /// the action was applied.
    pub fn apply_stick(&mut self, player_id: &str) -> bool {
        if !self.is_turn_of(player_id) {
            tracing::debug!("Ignoring stick from {}: not their turn", player_id);
            return false;
        }
        let Some(seat) = self.active_position else {
            return false;
        };

        self.players[seat].stick();
        tracing::info!(
            "{} sticks at {}",
            self.players[seat].name,
            self.players[seat].score()
        );
        self.end_turn();
        true
    }

    /// The active player is done (stick, bust or gone); the next tick picks
    /// the following seat.
    pub(crate) fn end_turn(&mut self) {
        self.try_transition(TableState::NextPlayer);
    }

    /// Deals one face-up card to the dealer.
    pub(crate) fn dealer_hit(&mut self) -> GameResult<Card> {
        let mut card = self.deck.deal()?;
        card.set_visible(true);
        self.dealer.receive(card);
        Ok(card)
    }
}
