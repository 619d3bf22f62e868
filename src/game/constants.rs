//! Game-related constants and default configuration values.

/// Default maximum number of seated players at the table.
pub const DEFAULT_MAX_PLAYERS: usize = 7;

/// Default cadence of the table step function.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 700;

/// The dealer draws below this score and stands at or above it.
pub const DEALER_STAND_SCORE: u32 = 17;

/// Highest score a hand can hold without busting.
pub const BUST_THRESHOLD: u32 = 21;

/// Pause between dealer reveal, dealer draws and settlement so clients can
/// animate each stage.
pub const DEALER_PACING_MS: u64 = 1000;

/// Cooldown between a finished round and the next waiting phase.
pub const RESTART_COOLDOWN_MS: u64 = 3000;

/// Broadcast channel capacity.
pub const BROADCAST_CHANNEL_CAPACITY: usize = 100;

/// Names handed to connections that do not provide one.
pub const GUEST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Hank", "Ivy", "Jack", "Karen",
    "Leo",
];
