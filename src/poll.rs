//! Timeout-bounded polling.
//!
//! The driver waits on three hardware conditions: the reset bit clearing, a new
//! measurement being latched and the device acknowledging a read. All of them
//! use [`PollTiming::step`], which decides what to do after an attempt purely
//! from the time already waited, so the loop can be tested without real delays.
//!
//! One [`PollBudget`] is shared by everything a driver operation waits on,
//! including bus retries nested inside a status poll. A delay is only taken
//! while the budget is not yet spent, so an operation never waits more than
//! `timeout_ms + interval` in total.

/// Decision taken after one poll attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// The awaited condition holds.
    Ready,
    /// Wait one interval and try again.
    Continue,
    /// The timeout has elapsed without the condition holding.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollTiming {
    pub timeout_ms: u32,
    pub interval_ms: u32,
}

impl PollTiming {
    pub fn new(timeout_ms: u32, interval_ms: u32) -> Self {
        PollTiming {
            timeout_ms,
            interval_ms,
        }
    }

    /// Delay between attempts. A zero interval counts as 1ms so that elapsed
    /// time always advances.
    pub fn interval(&self) -> u32 {
        self.interval_ms.max(1)
    }

    /// Decides the outcome of an attempt made after `elapsed_ms` of waiting,
    /// given whether the condition was observed. A ready condition wins over
    /// an expired timeout.
    pub fn step(&self, elapsed_ms: u32, ready: bool) -> PollOutcome {
        if ready {
            PollOutcome::Ready
        } else if elapsed_ms >= self.timeout_ms {
            PollOutcome::TimedOut
        } else {
            PollOutcome::Continue
        }
    }
}

/// Waiting time spent so far by one driver operation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    timing: PollTiming,
    elapsed_ms: u32,
}

impl PollBudget {
    pub fn new(timing: PollTiming) -> Self {
        PollBudget {
            timing,
            elapsed_ms: 0,
        }
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn step(&self, ready: bool) -> PollOutcome {
        self.timing.step(self.elapsed_ms, ready)
    }

    /// Books one poll interval and returns its length in milliseconds.
    pub fn spend(&mut self) -> u32 {
        let interval = self.timing.interval();
        self.elapsed_ms = self.elapsed_ms.saturating_add(interval);
        interval
    }
}
