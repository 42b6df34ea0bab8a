//! Fixed-cadence tick scheduling for the motion loop.

use std::time::{Duration, Instant};

/// Decides when the next motion tick is due.
///
/// Ticks never queue up: when the host stalls past several intervals,
/// exactly one tick fires and the schedule restarts from that moment.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
    paused: bool,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            paused: false,
        }
    }

    /// Returns true if a tick is due at `now`, rescheduling the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.paused || now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    /// Time left until the next tick, or `None` while paused.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        if self.paused {
            None
        } else {
            Some(self.next_due.saturating_duration_since(now))
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.next_due = now + self.interval;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the cadence; the next tick is one new interval from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = now + interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK, start);
        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(15)));
        assert!(ticker.poll(start + TICK));
        assert!(!ticker.poll(start + TICK));
        assert!(ticker.poll(start + TICK * 2));
    }

    #[test]
    fn test_no_pile_up_after_stall() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK, start);
        let late = start + Duration::from_secs(1);
        assert!(ticker.poll(late));
        // The missed ticks are dropped, not replayed
        assert!(!ticker.poll(late));
        assert!(!ticker.poll(late + Duration::from_millis(10)));
        assert!(ticker.poll(late + TICK));
    }

    #[test]
    fn test_pause_stops_ticks() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK, start);
        ticker.pause();
        assert!(ticker.is_paused());
        assert!(!ticker.poll(start + Duration::from_secs(5)));
        assert_eq!(ticker.timeout(start), None);

        let resumed = start + Duration::from_secs(5);
        ticker.resume(resumed);
        assert!(!ticker.poll(resumed));
        assert!(ticker.poll(resumed + TICK));
    }

    #[test]
    fn test_timeout_bounded_by_interval() {
        let start = Instant::now();
        let ticker = Ticker::new(TICK, start);
        assert_eq!(ticker.timeout(start), Some(TICK));
        assert_eq!(
            ticker.timeout(start + Duration::from_millis(10)),
            Some(Duration::from_millis(6))
        );
        assert_eq!(
            ticker.timeout(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_set_interval_reschedules() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK, start);
        let slow = Duration::from_millis(33);
        ticker.set_interval(slow, start);
        assert_eq!(ticker.interval(), slow);
        assert!(!ticker.poll(start + TICK));
        assert!(ticker.poll(start + slow));
    }
}
