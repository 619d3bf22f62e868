mod actions;
mod admission;
mod dealing;
mod phase;
mod settlement;
mod state;

pub use state::{DealerView, GameSnapshot, PlayerView};

use super::{
    card::Card,
    constants::{
        BUST_THRESHOLD, DEALER_PACING_MS, DEALER_STAND_SCORE, DEFAULT_MAX_PLAYERS,
        RESTART_COOLDOWN_MS,
    },
    deck::Deck,
    error::GameResult,
    player::Player,
};
use std::collections::VecDeque;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in milliseconds since UNIX epoch.
/// Returns 0 on system clock error (should never happen in practice).
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::error!("System clock error: {}", e);
            0
        })
}

/// Table lifecycle. The `Display` labels are the exact strings serialized
/// into state snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    /// No round running; waiting for at least one seated player.
    Waiting,
    /// A round was just assembled and dealt.
    Starting,
    /// The turn pointer must advance to the next seat.
    NextPlayer,
    /// A player is deciding; nothing moves until they act or leave.
    Acting,
    /// Every seat is done; the dealer's hole card comes up.
    DealerReveal,
    /// Pacing pause; a scheduled transition fires when due.
    Dealing,
    /// The dealer must draw another card.
    DealerTurn,
    /// Settlement of every seated hand against the dealer.
    Comparing,
    /// Round scored; the restart cooldown begins.
    Finished,
    /// Cooldown running before the table goes back to waiting.
    Restarting,
}

impl TableState {
    /// Returns the set of states this state can step to.
    pub fn valid_transitions(&self) -> &[TableState] {
        match self {
            TableState::Waiting => &[TableState::Starting],
            TableState::Starting => &[TableState::NextPlayer],
            TableState::NextPlayer => &[TableState::Acting, TableState::DealerReveal],
            TableState::Acting => &[TableState::NextPlayer],
            TableState::DealerReveal => &[TableState::Dealing],
            TableState::Dealing => &[
                TableState::DealerTurn,
                TableState::Comparing,
                TableState::Finished,
            ],
            TableState::DealerTurn => &[TableState::Dealing],
            TableState::Comparing => &[TableState::Dealing],
            TableState::Finished => &[TableState::Restarting],
            TableState::Restarting => &[TableState::Waiting],
        }
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TableState::Waiting => "waiting",
            TableState::Starting => "starting",
            TableState::NextPlayer => "turn",
            TableState::Acting => "acting",
            TableState::DealerReveal => "dealerReveal",
            TableState::Dealing => "dealing",
            TableState::DealerTurn => "dealerTurn",
            TableState::Comparing => "comparing",
            TableState::Finished => "finished",
            TableState::Restarting => "restarting",
        };
        f.write_str(label)
    }
}

/// Event tags handed back from `tick` for the broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    Starting,
    Turn,
    DealerReveal,
    Dealing,
    Comparing,
    Finished,
}

/// A pacing transition scheduled for a later tick. It only fires while the
/// round that scheduled it is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub target: TableState,
    pub due_at_ms: u64,
    pub generation: u64,
}

/// Table construction knobs with named defaults.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub max_players: usize,
    pub dealer_pacing_ms: u64,
    pub restart_cooldown_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            dealer_pacing_ms: DEALER_PACING_MS,
            restart_cooldown_ms: RESTART_COOLDOWN_MS,
        }
    }
}

/// The shared blackjack table: one deck, one dealer, seated players in seat
/// order and an admission queue, advanced by `tick` on a fixed cadence.
#[derive(Debug)]
pub struct Table {
    pub deck: Deck,
    pub dealer: Player,
    /// Seated players; vec order is seat order.
    pub players: Vec<Player>,
    /// Admission queue, promoted FIFO at round assembly.
    pub waiting: VecDeque<Player>,
    /// Seat of the player currently deciding; `None` outside player turns.
    pub active_position: Option<usize>,
    pub state: TableState,
    pub max_players: usize,
    pub dealer_pacing_ms: u64,
    pub restart_cooldown_ms: u64,
    /// Bumped at every round assembly and reset. A pending transition from
    /// an earlier generation never fires.
    pub generation: u64,
    pub pending: Option<ScheduledTransition>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self {
            deck: Deck::new(),
            dealer: Player::dealer(),
            players: Vec::new(),
            waiting: VecDeque::new(),
            active_position: None,
            state: TableState::Waiting,
            max_players: config.max_players,
            dealer_pacing_ms: config.dealer_pacing_ms,
            restart_cooldown_ms: config.restart_cooldown_ms,
            generation: 0,
            pending: None,
        }
    }

    /// Attempt a state transition. Invalid transitions are logged and
    /// ignored.
    pub(crate) fn try_transition(&mut self, target: TableState) {
        if self.state.valid_transitions().contains(&target) {
            self.state = target;
        } else {
            tracing::error!(
                "Invalid table transition: {:?} -> {:?} (valid: {:?})",
                self.state,
                target,
                self.state.valid_transitions()
            );
        }
    }

    /// The player whose turn it currently is, if any.
    pub fn active_player(&self) -> Option<&Player> {
        self.active_position.and_then(|pos| self.players.get(pos))
    }

    /// Whether the table is waiting on this player's decision. This is the
    /// sole admission check for `apply_hit` and `apply_stick`.
    pub fn is_turn_of(&self, player_id: &str) -> bool {
        self.state == TableState::Acting
            && self.active_player().is_some_and(|p| p.id == player_id)
    }

    /// Number of seated players that are still connected.
    pub(crate) fn connected_seated(&self) -> usize {
        self.players.iter().filter(|p| !p.has_left()).count()
    }

    /// Hard reset to the waiting phase. Bumping the generation disarms any
    /// pending transition.
    pub(crate) fn reset_to_waiting(&mut self) {
        self.state = TableState::Waiting;
        self.active_position = None;
        self.pending = None;
        self.generation += 1;
    }
}
