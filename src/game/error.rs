//! Engine error types.
//!
//! Out-of-turn player actions are not errors; they are silently ignored at
//! the table. Errors here are reserved for conditions the engine must
//! degrade from, like running out of cards.

use std::fmt;

/// Errors that can occur while mutating table state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The deck has no cards left to deal. Cannot happen under the default
    /// admission cap during the initial deal; callers degrade to a safe
    /// table state when it surfaces mid-round.
    DeckExhausted,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::DeckExhausted => write!(f, "deck has no cards left to deal"),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            GameError::DeckExhausted.to_string(),
            "deck has no cards left to deal"
        );
    }
}
