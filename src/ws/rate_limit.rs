use std::time::{Duration, Instant};

/// Fixed-window message limiter for WebSocket connections: at most `limit`
/// messages per window, counted from the first message of each window.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            count: 0,
            window_start: Instant::now(),
        }
    }

    /// Check if a message is allowed. Returns true if allowed, false if rate
    /// limited.
    pub fn allow(&mut self) -> bool {
        if self.window_start.elapsed() >= self.window {
            self.window_start = Instant::now();
            self.count = 0;
        }
        if self.count < self.limit {
            self.count += 1;
            true
        } else {
            false
        }
    }
}
