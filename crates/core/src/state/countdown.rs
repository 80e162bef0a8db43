use serde::{Deserialize, Serialize};

/// Seconds-until-next-refresh display.
///
/// Invariant: `1 <= remaining <= period`. Reaching zero wraps back to the
/// full period, so the value never goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    period: u64,
    remaining: u64,
}

impl Countdown {
    pub fn new(period_secs: u64) -> Self {
        let period = period_secs.max(1);
        Self {
            period,
            remaining: period,
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) {
        if self.remaining <= 1 {
            self.remaining = self.period;
        } else {
            self.remaining -= 1;
        }
    }

    /// Back to the full period (called whenever a fetch completes).
    pub fn reset(&mut self) {
        self.remaining = self.period;
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// "29m 59s" style rendering.
    pub fn display(&self) -> String {
        format!("{}m {}s", self.remaining / 60, self.remaining % 60)
    }
}
