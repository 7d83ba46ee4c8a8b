//! Debounce and one-shot timer abstractions.
//!
//! Both types are passive: they remember a pending value and a deadline, and
//! the owner's event loop asks them for the next deadline and fires them once
//! it has passed. Time is always passed in, so behaviour is deterministic
//! under test.
//!
//! - `Debouncer::push` replaces any pending value and restarts the window, so
//!   only the most recent value of a burst is delivered.
//! - `OneShotTimer::arm` refuses to re-arm while a value is pending.
use std::time::{Duration, Instant};

/// Coalesces a burst of values into the last one.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: None }
    }

    /// Schedule `value`, discarding whatever was pending.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.wait));
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its window has elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, at)) if now >= at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Delivers a single value after a delay.
#[derive(Debug)]
pub struct OneShotTimer<T> {
    pending: Option<(T, Instant)>,
}

impl<T> Default for OneShotTimer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> OneShotTimer<T> {
    /// An idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `value` for `now + delay`.
    ///
    /// Returns the value back if the timer is already armed.
    pub fn arm(&mut self, value: T, now: Instant, delay: Duration) -> Result<(), T> {
        if self.pending.is_some() {
            return Err(value);
        }
        self.pending = Some((value, now + delay));
        Ok(())
    }

    /// When the armed value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Whether the timer is armed.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the value if it is due.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, at)) if now >= at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Disarm, returning the value that would have fired.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Earliest of a set of optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(120);

    #[test]
    fn test_debounce_delivers_last_value_only() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WAIT);
        debounce.push("1", start);
        debounce.push("12", start + Duration::from_millis(50));
        debounce.push("123", start + Duration::from_millis(100));

        assert_eq!(debounce.fire(start + Duration::from_millis(150)), None);
        assert_eq!(debounce.fire(start + Duration::from_millis(220)), Some("123"));
        assert_eq!(debounce.fire(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_debounce_cancel() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WAIT);
        debounce.push(1, start);
        assert!(debounce.is_pending());
        assert_eq!(debounce.cancel(), Some(1));
        assert_eq!(debounce.deadline(), None);
        assert_eq!(debounce.fire(start + WAIT), None);
    }

    #[test]
    fn test_one_shot_refuses_rearm() {
        let start = Instant::now();
        let delay = Duration::from_millis(1200);
        let mut timer = OneShotTimer::new();
        assert!(timer.arm('a', start, delay).is_ok());
        assert_eq!(timer.arm('b', start, delay), Err('b'));
        assert_eq!(timer.deadline(), Some(start + delay));
        assert_eq!(timer.fire(start + Duration::from_millis(1199)), None);
        assert_eq!(timer.fire(start + delay), Some('a'));
        assert!(!timer.is_armed());
        assert!(timer.arm('c', start + delay, delay).is_ok());
        assert_eq!(timer.cancel(), Some('c'));
    }

    #[test]
    fn test_earliest() {
        let start = Instant::now();
        let later = start + WAIT;
        assert_eq!(earliest([None, Some(later), Some(start)]), Some(start));
        assert_eq!(earliest([None, None]), None);
    }
}
