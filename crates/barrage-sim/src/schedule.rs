//! Tick-based timers for the engine's two temporal indirections:
//! the repeating power-charge oscillator and the deferred turn advance.
//!
//! Both are plain tick deadlines held in `Option` fields, so canceling is
//! `Option::take()` and tests drive them by ticking the engine instead of
//! waiting on wall-clock timers.

/// Repeating timer with a fixed tick period.
#[derive(Debug, Clone, Copy)]
pub struct RepeatingTimer {
    period: u64,
    next_due: u64,
}

impl RepeatingTimer {
    /// Start a timer whose first firing is `period` ticks from `now`.
    pub fn starting_at(now: u64, period: u64) -> Self {
        debug_assert!(period > 0, "zero-period timer would fire every tick");
        Self {
            period: period.max(1),
            next_due: now + period,
        }
    }

    /// True exactly when the timer is due; reschedules itself on firing.
    pub fn fire(&mut self, now: u64) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.period;
            true
        } else {
            false
        }
    }
}

/// One-shot tick deadline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    due: u64,
}

impl Deadline {
    pub fn after(now: u64, delay: u64) -> Self {
        Self { due: now + delay }
    }

    pub fn ready(&self, now: u64) -> bool {
        now >= self.due
    }

    /// Ticks left until due (0 once ready).
    pub fn remaining(&self, now: u64) -> u64 {
        self.due.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_timer_fires_on_period() {
        let mut timer = RepeatingTimer::starting_at(10, 3);
        assert!(!timer.fire(11));
        assert!(!timer.fire(12));
        assert!(timer.fire(13));
        assert!(!timer.fire(14));
        assert!(!timer.fire(15));
        assert!(timer.fire(16));
    }

    #[test]
    fn test_deadline() {
        let d = Deadline::after(100, 48);
        assert!(!d.ready(100));
        assert!(!d.ready(147));
        assert!(d.ready(148));
        assert!(d.ready(500));
    }

    #[test]
    fn test_deadline_remaining_counts_down() {
        let d = Deadline::after(100, 48);
        assert_eq!(d.remaining(100), 48);
        assert_eq!(d.remaining(147), 1);
        assert_eq!(d.remaining(148), 0);
        assert_eq!(d.remaining(500), 0);
    }
}
