//! Debouncer
//!
//! Defers a value until it has been stable for a quiet interval. Time is passed
//! in by the caller as a monotonic offset, so the same logic runs under browser
//! timers and under tests with a simulated clock.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace any pending value and push the deadline to `now + interval`.
    /// Returns the new deadline.
    pub fn schedule(&mut self, value: T, now: Duration) -> Duration {
        let deadline = now + self.interval;
        self.pending = Some((value, deadline));
        deadline
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet interval has elapsed
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_interval() {
        let mut debouncer = Debouncer::new(ms(1500));
        debouncer.schedule("a", ms(0));

        assert_eq!(debouncer.poll(ms(1499)), None);
        assert_eq!(debouncer.poll(ms(1500)), Some("a"));
        assert_eq!(debouncer.poll(ms(5000)), None);
    }

    #[test]
    fn test_reschedule_keeps_latest_value_and_deadline() {
        let mut debouncer = Debouncer::new(ms(1500));
        debouncer.schedule(1, ms(0));
        debouncer.schedule(2, ms(200));
        let deadline = debouncer.schedule(3, ms(400));

        assert_eq!(deadline, ms(1900));
        assert_eq!(debouncer.poll(ms(1500)), None);
        assert_eq!(debouncer.poll(ms(1900)), Some(3));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(ms(100));
        debouncer.schedule(7, ms(0));
        assert_eq!(debouncer.cancel(), Some(7));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(ms(1000)), None);
    }
}
