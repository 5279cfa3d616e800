// ⏱️ Completion timer - one-shot, owned by the flow that armed it
//
// The event loop polls it on every tick. Dropping or resetting the flow
// disarms it, so it can only ever fire once and only for a live flow.

use std::time::{Duration, Instant};

/// Delay before a finished flow hands control back to the dashboard
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default)]
pub struct CompletionTimer {
    deadline: Option<Instant>,
}

impl CompletionTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time left before firing, None when disarmed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// True exactly once, on the first poll at or after the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
