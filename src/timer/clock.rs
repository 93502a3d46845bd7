use std::time::Duration;
use tokio::time::Instant;

/// Running-time budget of a pausable countdown.
///
/// Time only counts against the budget while the countdown is armed.
#[derive(Debug)]
pub(crate) struct Countdown {
    remaining: Duration,
    armed_at: Option<Instant>,
}

impl Countdown {
    pub(crate) fn new(total: Duration) -> Self {
        Self {
            remaining: total,
            armed_at: None,
        }
    }

    /// Start consuming the budget. Returns the instant the budget runs out.
    pub(crate) fn arm(&mut self) -> Instant {
        let now = Instant::now();
        self.armed_at = Some(now);
        now + self.remaining
    }

    /// Stop consuming the budget, keeping what is left of it.
    pub(crate) fn disarm(&mut self) {
        if let Some(armed_at) = self.armed_at.take() {
            self.remaining = self.remaining.saturating_sub(armed_at.elapsed());
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub(crate) fn remaining(&self) -> Duration {
        match self.armed_at {
            Some(armed_at) => self.remaining.saturating_sub(armed_at.elapsed()),
            None => self.remaining,
        }
    }
}
