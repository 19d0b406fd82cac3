//! Explicit autoplay timer lifecycle.
//!
//! The timer is cooperative: it never fires on its own. The host event
//! loop calls [`AutoplayTimer::poll`] with the current instant and
//! applies however many ticks have come due. Arming and cancelling are
//! explicit, so a dangling timer after teardown cannot happen. At
//! most one armed timer exists by construction.

use std::time::{Duration, Instant};

use log::debug;

#[derive(Clone, Copy, Debug)]
struct Armed {
    interval: Duration,
    next_due: Instant,
}

/// Deterministic repeating timer for autoplay.
///
/// ## Example
///
/// ```rust
/// use flipbook_core::AutoplayTimer;
/// use std::time::{Duration, Instant};
///
/// let mut timer = AutoplayTimer::new();
/// let t0 = Instant::now();
/// timer.start(Duration::from_millis(100), t0);
///
/// assert_eq!(timer.poll(t0 + Duration::from_millis(50)), 0);
/// assert_eq!(timer.poll(t0 + Duration::from_millis(250)), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AutoplayTimer {
    armed: Option<Armed>,
}

impl AutoplayTimer {
    /// Create a timer with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire every `interval`, starting from `now`.
    ///
    /// Any previously armed timer is torn down first, so reconfiguring
    /// (rate change, sequence growth) never stacks timers. The interval
    /// is floored at 1 ms; a zero interval would make `poll` spin
    /// without ever advancing the deadline.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        let interval = interval.max(Duration::from_millis(1));
        debug!("autoplay timer armed, interval {:?}", interval);
        self.armed = Some(Armed {
            interval,
            next_due: now + interval,
        });
    }

    /// Cancel any armed timer. Idempotent; always call on teardown.
    pub fn stop(&mut self) {
        if self.armed.take().is_some() {
            debug!("autoplay timer cancelled");
        }
    }

    /// True while a timer is armed.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.armed.is_some()
    }

    /// The armed interval, if any.
    pub fn interval(&self) -> Option<Duration> {
        self.armed.map(|a| a.interval)
    }

    /// How long until the next fire, or `None` when nothing is armed.
    /// Returns a zero duration when the timer is already due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed.map(|a| a.next_due.saturating_duration_since(now))
    }

    /// Number of ticks that have come due by `now`.
    ///
    /// Catches up if polling lagged behind the interval: each due tick
    /// advances the deadline by one interval, so slow hosts still see
    /// every tick exactly once.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(armed) = self.armed.as_mut() else {
            return 0;
        };
        let mut ticks = 0;
        while armed.next_due <= now {
            armed.next_due += armed.interval;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_never_fires() {
        let mut timer = AutoplayTimer::new();
        assert!(!timer.is_live());
        assert_eq!(timer.poll(Instant::now()), 0);
        assert_eq!(timer.time_until_due(Instant::now()), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();
        timer.start(Duration::from_millis(100), t0);

        assert_eq!(timer.poll(t0 + Duration::from_millis(99)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(100)), 1);
        // Already consumed; nothing more due at the same instant
        assert_eq!(timer.poll(t0 + Duration::from_millis(100)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(200)), 1);
    }

    #[test]
    fn lagging_poll_catches_up() {
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();
        timer.start(Duration::from_millis(50), t0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(275)), 5);
    }

    #[test]
    fn restart_replaces_previous_timer() {
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();
        timer.start(Duration::from_millis(10), t0);
        // Re-arming resets the deadline and discards the old schedule
        timer.start(Duration::from_millis(100), t0);
        assert!(timer.is_live());
        assert_eq!(timer.interval(), Some(Duration::from_millis(100)));
        assert_eq!(timer.poll(t0 + Duration::from_millis(50)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(100)), 1);
    }

    #[test]
    fn zero_interval_is_floored_and_poll_terminates() {
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();
        timer.start(Duration::ZERO, t0);
        assert_eq!(timer.interval(), Some(Duration::from_millis(1)));
        // One tick per floored millisecond, not an endless loop
        assert_eq!(timer.poll(t0 + Duration::from_millis(5)), 5);
    }

    #[test]
    fn stop_cancels_pending_fire() {
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();
        timer.start(Duration::from_millis(10), t0);
        timer.stop();
        assert!(!timer.is_live());
        assert_eq!(timer.poll(t0 + Duration::from_secs(10)), 0);
        // stop is idempotent
        timer.stop();
    }

    #[test]
    fn time_until_due_counts_down() {
        let mut timer = AutoplayTimer::new();
        let t0 = Instant::now();
        timer.start(Duration::from_millis(100), t0);
        assert_eq!(
            timer.time_until_due(t0 + Duration::from_millis(30)),
            Some(Duration::from_millis(70))
        );
        // Past due clamps to zero
        assert_eq!(
            timer.time_until_due(t0 + Duration::from_millis(150)),
            Some(Duration::ZERO)
        );
    }
}
