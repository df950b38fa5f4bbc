//! Search debouncing.
//!
//! Instants are passed in so the timer can be driven by the UI tick and by
//! tests alike. At most one search is pending; new input replaces it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `term`, cancelling whatever was pending.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now + self.delay));
    }

    /// The pending term once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.input("acme", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + DELAY).as_deref(), Some("acme"));
        assert_eq!(debouncer.poll(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn test_new_input_cancels_previous() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.input("ac", start);
        debouncer.input("acme", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)).as_deref(),
            Some("acme")
        );
    }

    #[test]
    fn test_cancel_clears_pending() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);
        debouncer.input("acme", start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + DELAY), None);
    }
}
