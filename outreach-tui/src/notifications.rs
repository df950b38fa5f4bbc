//! Toast notifications.
//!
//! One centre per process, owned by `App`. Toasts expire after a fixed TTL;
//! blocking alerts for failed mutations are modals, not toasts.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Most toasts kept at once; older ones are dropped first.
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>, now: Instant) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    toasts: VecDeque<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    pub fn push_at(&mut self, level: NotificationLevel, message: impl Into<String>, now: Instant) {
        self.toasts.push_back(Notification::new(level, message, now));
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    /// Drop toasts older than the TTL.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < ttl);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.toasts.back()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_drops_expired_toasts() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(Duration::from_secs(4));
        center.push_at(NotificationLevel::Info, "first", start);
        center.push_at(NotificationLevel::Success, "second", start + Duration::from_secs(3));

        center.prune(start + Duration::from_secs(5));
        assert_eq!(center.len(), 1);
        assert_eq!(center.latest().map(|t| t.message.as_str()), Some("second"));

        center.prune(start + Duration::from_secs(8));
        assert!(center.is_empty());
    }

    #[test]
    fn test_capacity_keeps_newest() {
        let now = Instant::now();
        let mut center = NotificationCenter::new(Duration::from_secs(60));
        for i in 0..8 {
            center.push_at(NotificationLevel::Info, format!("toast {}", i), now);
        }
        assert_eq!(center.len(), MAX_TOASTS);
        assert_eq!(center.latest().map(|t| t.message.as_str()), Some("toast 7"));
    }
}
