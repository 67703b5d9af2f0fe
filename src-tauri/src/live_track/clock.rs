//! Clock - Fixed-period interval timers driven by elapsed time
//!
//! Timers never sleep or spawn; the simulator feeds them elapsed time and
//! fires whichever one comes due first.

use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    since_fire: Duration,
    fired: u64,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            since_fire: Duration::ZERO,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left before the next fire
    pub fn until_due(&self) -> Duration {
        self.period.saturating_sub(self.since_fire)
    }

    pub fn is_due(&self) -> bool {
        self.since_fire >= self.period
    }

    pub fn elapse(&mut self, dt: Duration) {
        self.since_fire += dt;
    }

    /// Consume one period. Returns false if the timer was not due.
    pub fn fire(&mut self) -> bool {
        if !self.is_due() {
            return false;
        }
        self.since_fire -= self.period;
        self.fired += 1;
        true
    }

    /// Drop any accumulated phase
    pub fn cancel(&mut self) {
        self.since_fire = Duration::ZERO;
    }

    /// Back to a fresh timer: no phase, no fire count
    pub fn restart(&mut self) {
        self.since_fire = Duration::ZERO;
        self.fired = 0;
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}
