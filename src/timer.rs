//! Victory cooldown owned by the presentation layer.
//!
//! The engine only reports that a level is satisfied; it never schedules anything. This module
//! holds the timer the user interface arms once a win is observed, so the winning configuration
//! stays on screen for a moment before the next level is requested.

use std::time::{Duration, Instant};

/// Cooldown between observing a satisfied level and advancing past it.
#[derive(Clone, Debug)]
pub(crate) struct VictoryTimer {
    /// How long the win stays on screen.
    delay: Duration,
    /// When the win was first observed, if it has been.
    ///
    /// This field is [`None`] while the level is unsolved and is cleared again once the timer has
    /// fired or the level is reloaded.
    armed_at: Option<Instant>,
}

impl VictoryTimer {
    /// Creates a disarmed timer with the given delay.
    pub(crate) const fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed_at: None,
        }
    }

    /// Checks whether the timer is counting down.
    pub(crate) const fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Disarms the timer.
    pub(crate) fn clear(&mut self) {
        self.armed_at = None;
    }

    /// Feeds the current satisfied flag and reports whether it is time to advance.
    ///
    /// The first call with `satisfied` set arms the timer; later calls return `true` once the delay
    /// has elapsed, disarming the timer in the process. An unsatisfied level always disarms it.
    pub(crate) fn update(&mut self, satisfied: bool) -> bool {
        self.update_at(satisfied, Instant::now())
    }

    /// Same as [`VictoryTimer::update`] with an explicit clock reading.
    fn update_at(&mut self, satisfied: bool, now: Instant) -> bool {
        if !satisfied {
            self.clear();
            return false;
        }

        match self.armed_at {
            None if self.delay.is_zero() => true,
            None => {
                self.armed_at = Some(now);
                false
            }
            Some(armed_at) if now.saturating_duration_since(armed_at) >= self.delay => {
                self.clear();
                true
            }
            Some(_) => false,
        }
    }
}
