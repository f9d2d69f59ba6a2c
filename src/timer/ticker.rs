//! Cancellable periodic tick source
//!
//! The ticker is plain owned data: it is armed with a deadline and polled
//! from the event loop. Dropping it (or calling `stop`) is the teardown.

use std::time::{Duration, Instant};

/// Default tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic scheduled task
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    /// Arm the ticker; the first tick is due one full period after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
    }

    /// Cancel any pending tick
    pub fn stop(&mut self) {
        self.next_deadline = None;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Number of periods that elapsed up to `now`.
    ///
    /// Advances the deadline past `now`, so each period is reported once.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut deadline) = self.next_deadline else {
            return 0;
        };

        let mut fired = 0;
        while deadline <= now {
            fired += 1;
            deadline += self.period;
        }
        self.next_deadline = Some(deadline);
        fired
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_never_fires() {
        let mut ticker = Ticker::default();
        let now = Instant::now();
        assert_eq!(ticker.poll(now + Duration::from_secs(10)), 0);
        assert!(!ticker.is_armed());
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut ticker = Ticker::default();
        let t0 = Instant::now();
        ticker.start(t0);

        assert_eq!(ticker.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(ticker.poll(t0 + Duration::from_secs(1)), 1);
        assert_eq!(ticker.poll(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.poll(t0 + Duration::from_millis(4200)), 3);
    }

    #[test]
    fn test_stop_cancels() {
        let mut ticker = Ticker::default();
        let t0 = Instant::now();
        ticker.start(t0);
        ticker.stop();
        assert_eq!(ticker.poll(t0 + Duration::from_secs(5)), 0);
    }
}
