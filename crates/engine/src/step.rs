//! Fixed-step tick accumulator.
//!
//! Elapsed wall time is added to an accumulator and drained one period per
//! tick. At most `max_ticks` ticks run per `advance`; when that cap is hit
//! the remaining whole periods are dropped and only the sub-period remainder
//! is carried, so a long stall never turns into a burst of catch-up ticks.
//!
//! Accounting is in integer nanoseconds: 10 Hz advanced by 350 ms yields
//! exactly 3 ticks with 50 ms carried into the next call.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStep {
    period: Duration,
    accumulator: Duration,
    max_ticks: u32,
}

/// Convert a rate in Hz to a tick period. Returns `None` for rates that are
/// not finite and positive.
pub fn period_from_hz(hz: f64) -> Option<Duration> {
    if !hz.is_finite() || hz <= 0.0 {
        return None;
    }
    let period = Duration::try_from_secs_f64(1.0 / hz).ok()?;
    if period.is_zero() {
        return None;
    }
    Some(period)
}

impl FixedStep {
    pub fn new(period: Duration, max_ticks: u32) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
            max_ticks: max_ticks.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn set_period(&mut self, period: Duration) {
        self.period = period.max(Duration::from_nanos(1));
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    /// Time already accumulated toward the next tick.
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }

    /// Add `elapsed` and return how many ticks are due now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut ticks = 0;
        while self.accumulator >= self.period && ticks < self.max_ticks {
            self.accumulator -= self.period;
            ticks += 1;
        }

        if self.accumulator >= self.period {
            let rem = self.accumulator.as_nanos() % self.period.as_nanos();
            self.accumulator = Duration::from_nanos(rem as u64);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
