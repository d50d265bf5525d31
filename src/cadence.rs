//! Periodic action gating on a free-running millisecond counter.
//!
//! A [`Cadence`] is a period plus the timestamp of the last execution.
//! The monitor loop holds two independent ones: the logging cadence and
//! the flush cadence.
//!
//! ```text
//!   last            last + period
//!    │◀──── period ────▶│
//! ───┼──────────────────┼──────┬──────────▶ millis
//!    │     not due      │ due  │ now
//!                              └─ mark(now): last = now
//! ```
//!
//! `last` is reset to the time captured when the action *started*, never
//! to a time read after the action finished, so processing latency never
//! pushes the next execution later than `now + period`.
//!
//! The counter is a `u32` that wraps after ~49.7 days; all arithmetic is
//! wrapping, so a due check across the wrap behaves like any other.

/// A period and the start time of its last execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_ms: u32,
    last_ms: u32,
}

impl Cadence {
    /// Create a cadence whose first execution is due `period_ms` after
    /// `start_ms`.
    pub const fn new(period_ms: u32, start_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: start_ms,
        }
    }

    /// Milliseconds since the last execution (wrap-safe).
    pub const fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_ms)
    }

    /// Whether at least one full period has elapsed at `now_ms`.
    pub const fn is_due(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) >= self.period_ms
    }

    /// Record an execution that started at `now_ms`.
    pub fn mark(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    /// Check and mark in one step. Returns `true` if the action should run.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.mark(now_ms);
            true
        } else {
            false
        }
    }

    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub const fn last_ms(&self) -> u32 {
        self.last_ms
    }
}
