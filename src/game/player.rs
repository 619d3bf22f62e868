use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::{Card, Rank};

/// Lifecycle tags for a participant. The `Display` labels are the exact
/// strings clients see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// In the admission queue.
    WaitingToPlay,
    /// Seated, round not yet at this player's turn.
    WaitingToAct,
    /// It is this player's turn.
    Deciding,
    Stick,
    Bust,
    Win,
    Lose,
    /// Disconnected. The seat is reclaimed at the next round assembly.
    Left,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerState::WaitingToPlay => "Waiting to play",
            PlayerState::WaitingToAct => "Waiting to act",
            PlayerState::Deciding => "Deciding",
            PlayerState::Stick => "Stick",
            PlayerState::Bust => "Bust",
            PlayerState::Win => "Wins",
            PlayerState::Lose => "Loses",
            PlayerState::Left => "Left",
        };
        f.write_str(label)
    }
}

/// Running win/loss tally across rounds at this table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
}

/// Per-participant state. The dealer is a `Player` with `is_dealer` set;
/// it never takes a seat and never appears in the table's seated list.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub hand: Vec<Card>,
    /// Seat index; `None` while unseated (queued, or the dealer).
    pub position: Option<usize>,
    pub state: PlayerState,
    pub is_dealer: bool,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            hand: vec![],
            position: None,
            state: PlayerState::WaitingToPlay,
            is_dealer: false,
            stats: PlayerStats::default(),
        }
    }

    /// The house. Plays last and never occupies a seat.
    pub fn dealer() -> Self {
        Self {
            id: "dealer".to_string(),
            name: "Dealer".to_string(),
            hand: vec![],
            position: None,
            state: PlayerState::WaitingToPlay,
            is_dealer: true,
            stats: PlayerStats::default(),
        }
    }

    /// Takes a seat.
    pub fn join(&mut self, position: usize) {
        self.state = PlayerState::WaitingToAct;
        self.position = Some(position);
    }

    /// Back to the admission queue.
    pub fn wait(&mut self) {
        self.state = PlayerState::WaitingToPlay;
        self.position = None;
    }

    /// Resets for a fresh round. The dealer keeps `position == None`.
    pub fn new_round(&mut self, position: Option<usize>) {
        self.hand.clear();
        self.position = position;
        self.state = PlayerState::WaitingToAct;
    }

    /// Appends a dealt card to the hand.
    pub fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Turns every card in the hand face up.
    pub fn reveal_hand(&mut self) {
        for card in &mut self.hand {
            card.set_visible(true);
        }
    }

    /// It is this player's turn: show the hand to the table and start
    /// deciding.
    pub fn start_acting(&mut self) {
        self.reveal_hand();
        self.state = PlayerState::Deciding;
    }

    /// Hand score. Every ace counts as 1, then a single ace is promoted to
    /// 11 when that cannot bust the hand. Hands with more than one ace only
    /// ever get the one promotion.
    pub fn score(&self) -> u32 {
        let mut total = 0;
        let mut has_ace = false;
        for card in &self.hand {
            if card.rank == Rank::Ace {
                has_ace = true;
            }
            total += card.value(false);
        }
        if has_ace && total < 12 {
            total += 10;
        }
        total
    }

    pub fn stick(&mut self) {
        self.state = PlayerState::Stick;
    }

    pub fn bust(&mut self) {
        self.state = PlayerState::Bust;
    }

    pub fn leave(&mut self) {
        self.state = PlayerState::Left;
    }

    pub fn has_left(&self) -> bool {
        self.state == PlayerState::Left
    }

    /// Round won. A departed player keeps the `Left` label but the tally
    /// still moves.
    pub fn win(&mut self) {
        self.stats.wins += 1;
        if self.state != PlayerState::Left {
            self.state = PlayerState::Win;
        }
    }

    /// Round lost.
    pub fn lose(&mut self) {
        self.stats.losses += 1;
        if self.state != PlayerState::Left {
            self.state = PlayerState::Lose;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::Suit;

    fn player_with_hand(ranks: &[Rank]) -> Player {
        let mut player = Player::new("p1".to_string(), "Player 1".to_string());
        for &rank in ranks {
            player.receive(Card::new(Suit::Spades, rank));
        }
        player
    }

    #[test]
    fn test_ace_king_scores_21() {
        let player = player_with_hand(&[Rank::Ace, Rank::King]);
        assert_eq!(player.score(), 21);
    }

    #[test]
    fn test_two_aces_and_nine_score_21() {
        // Only one ace is ever promoted to 11.
        let player = player_with_hand(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(player.score(), 21);
    }

    #[test]
    fn test_three_aces_and_nine_get_no_promotion() {
        let player = player_with_hand(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(player.score(), 12);
    }

    #[test]
    fn test_hard_hand_scores_sum() {
        let player = player_with_hand(&[Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(player.score(), 25);
    }

    #[test]
    fn test_start_acting_reveals_hand() {
        let mut player = player_with_hand(&[Rank::Ace, Rank::King]);
        assert!(player.hand.iter().all(|c| !c.is_visible()));

        player.start_acting();
        assert_eq!(player.state, PlayerState::Deciding);
        assert!(player.hand.iter().all(|c| c.is_visible()));
    }

    #[test]
    fn test_new_round_clears_hand_and_reseats() {
        let mut player = player_with_hand(&[Rank::Ace, Rank::King]);
        player.stick();

        player.new_round(Some(2));
        assert!(player.hand.is_empty());
        assert_eq!(player.position, Some(2));
        assert_eq!(player.state, PlayerState::WaitingToAct);
    }

    #[test]
    fn test_result_does_not_overwrite_left_label() {
        let mut player = player_with_hand(&[Rank::King, Rank::Nine]);
        player.leave();

        player.win();
        assert_eq!(player.state, PlayerState::Left);
        assert_eq!(player.stats.wins, 1);

        player.lose();
        assert_eq!(player.state, PlayerState::Left);
        assert_eq!(player.stats.losses, 1);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(PlayerState::WaitingToPlay.to_string(), "Waiting to play");
        assert_eq!(PlayerState::Deciding.to_string(), "Deciding");
        assert_eq!(PlayerState::Win.to_string(), "Wins");
        assert_eq!(PlayerState::Lose.to_string(), "Loses");
    }
}
