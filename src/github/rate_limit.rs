//! Rate-limit bookkeeping
//!
//! The server reports the remaining quota as an absolute value on every
//! response; the budget is overwritten from that header, never decremented
//! locally. Correctness therefore depends on the freshness of the last
//! observed value.

use std::thread;
use std::time::Duration;

/// Cooldown applied when the budget is exhausted
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// Remaining permitted calls, as last reported by the server
#[derive(Debug, Clone, Copy)]
pub struct RateBudget {
    pub remaining: u32,
}

impl Default for RateBudget {
    fn default() -> Self {
        // Optimistic until the first response says otherwise.
        Self { remaining: 999 }
    }
}

impl RateBudget {
    /// Overwrite from the quota header of the latest response. A missing
    /// header leaves the last observed value in place.
    pub fn observe(&mut self, remaining: Option<u32>) {
        if let Some(remaining) = remaining {
            self.remaining = remaining;
        }
    }
}

/// Fixed-cooldown policy consulted before every network call
#[derive(Debug, Clone, Copy)]
pub struct RatePolicy {
    cooldown: Duration,
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl RatePolicy {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    /// Block for the full cooldown when the budget is exhausted. The wait is
    /// not cancellable.
    pub fn before_call(&self, budget: &RateBudget) {
        if budget.remaining <= 1 {
            thread::sleep(self.cooldown);
        }
    }
}
