use super::*;

impl Table {
    /// Scores every seated hand against the dealer and applies the results.
    ///
    /// Dealer bust: every player still at 21 or under wins, players who also
    /// busted lose alongside the dealer. Dealer standing: a player must beat
    /// the dealer's score without busting; an equal score loses. The
    /// dealer's tally moves opposite each per-player outcome. Departed
    /// players are skipped entirely.
    pub(crate) fn settle_round(&mut self) {
        let dealer_score = self.dealer.score();
        for player in &mut self.players {
            if player.has_left() {
                continue;
            }
            let player_score = player.score();
            let player_wins = if dealer_score > BUST_THRESHOLD {
                player_score <= BUST_THRESHOLD
            } else {
                player_score > dealer_score && player_score <= BUST_THRESHOLD
            };

            if player_wins {
                self.dealer.lose();
                player.win();
            } else {
                self.dealer.win();
                player.lose();
            }
            tracing::info!(
                "{} {} ({} against dealer {})",
                player.name,
                if player_wins { "wins" } else { "loses" },
                player_score,
                dealer_score
            );
        }
    }
}
