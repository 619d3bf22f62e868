use super::*;

impl Table {
    /// Assembles and starts a new round: reclaims departed seats, promotes
    /// queued players, resets everyone, refreshes the deck and deals the
    /// opening hands. Stays in `Waiting` when nobody is left to play.
    pub(crate) fn new_round(&mut self) {
        // Departed players free their seats and queue slots here, never
        // mid-round.
        self.players.retain(|p| !p.has_left());
        self.waiting.retain(|p| !p.has_left());

        // Promote queued players into free seats, FIFO.
        while self.players.len() < self.max_players {
            let Some(mut promoted) = self.waiting.pop_front() else {
                break;
            };
            let seat = self.players.len();
            promoted.join(seat);
            tracing::info!("Promoting {} from the queue to seat {}", promoted.name, seat);
            self.players.push(promoted);
        }

        if self.players.is_empty() {
            tracing::debug!("Nobody seated after assembly, staying in waiting");
            return;
        }

        // A fresh round invalidates anything the previous one scheduled.
        self.generation += 1;
        self.pending = None;
        self.active_position = None;

        self.dealer.new_round(None);
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.new_round(Some(seat));
        }
        self.deck.refresh();

        if let Err(e) = self.deal_initial() {
            tracing::error!("Aborting round, could not finish the initial deal: {}", e);
            self.reset_to_waiting();
            return;
        }

        self.try_transition(TableState::Starting);
        tracing::info!(
            "New round with {} players ({} queued)",
            self.players.len(),
            self.waiting.len()
        );
    }

    /// Two passes of one card each, dealer first then seat order: the first
    /// pass face down, the second face up. The dealer's face-down first card
    /// is the hole card, hidden until the reveal phase.
    fn deal_initial(&mut self) -> GameResult<()> {
        let card = self.deck.deal()?;
        self.dealer.receive(card);
        for player in &mut self.players {
            let card = self.deck.deal()?;
            player.receive(card);
        }

        let mut card = self.deck.deal()?;
        card.set_visible(true);
        self.dealer.receive(card);
        for player in &mut self.players {
            let mut card = self.deck.deal()?;
            card.set_visible(true);
            player.receive(card);
        }

        Ok(())
    }
}
