//! Cancellable millisecond timers on the session clock
//!
//! Timers never run on their own: `Session::advance` asks each one when it is
//! next due and fires them in order.

/// A one-shot or repeating timer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    period_ms: u64,
    next_due_ms: Option<u64>,
    repeating: bool,
}

impl Timer {
    /// Arm to fire every `period_ms`, first at `now_ms + period_ms`.
    /// Replaces any pending schedule.
    pub fn start_repeating(&mut self, now_ms: u64, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.period_ms = period_ms;
        self.next_due_ms = Some(now_ms.saturating_add(period_ms));
        self.repeating = true;
    }

    /// Arm to fire once at `now_ms + delay_ms`
    pub fn start_once(&mut self, now_ms: u64, delay_ms: u64) {
        self.period_ms = delay_ms;
        self.next_due_ms = Some(now_ms.saturating_add(delay_ms));
        self.repeating = false;
    }

    /// Safe to call on an inactive timer
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn due_at(&self) -> Option<u64> {
        self.next_due_ms
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Consume the pending firing. Repeating timers re-arm one period later,
    /// one-shot timers go inactive. Returns false if nothing was pending.
    /// A repeating timer whose next firing would pass `u64::MAX` goes inactive.
    pub fn fire(&mut self) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        self.next_due_ms = if self.repeating {
            due.checked_add(self.period_ms)
        } else {
            None
        };
        true
    }
}
