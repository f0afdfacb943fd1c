//! Failed-login tracking per client IP.

use crate::config::AuthConfig;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Counts failed logins per IP inside a sliding window
pub struct SuspiciousActivityTracker {
    failed_attempts: Mutex<HashMap<String, (usize, Instant)>>,
    max_failures: usize,
    window: Duration,
}

impl SuspiciousActivityTracker {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            failed_attempts: Mutex::new(HashMap::new()),
            max_failures: config.max_failures,
            window: Duration::from_secs(config.failure_window_seconds),
        }
    }

    /// Record a failed login for `ip`.
    ///
    /// Returns `true` once the IP has reached the threshold within the window.
    pub fn record_failure(&self, ip: &str) -> bool {
        let mut attempts = self
            .failed_attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let window = self.window;

        attempts.retain(|_, (_, first)| now.duration_since(*first) < window);

        let (count, _) = attempts.entry(ip.to_string()).or_insert((0, now));
        *count += 1;
        *count >= self.max_failures
    }

    /// Whether `ip` is currently over the failure threshold
    pub fn is_suspicious(&self, ip: &str) -> bool {
        let attempts = self
            .failed_attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        attempts.get(ip).is_some_and(|(count, first)| {
            first.elapsed() < self.window && *count >= self.max_failures
        })
    }

    /// Forget failures for `ip` after a successful login
    pub fn clear(&self, ip: &str) {
        self.failed_attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(ip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(max_failures: usize) -> SuspiciousActivityTracker {
        SuspiciousActivityTracker::new(&AuthConfig {
            max_failures,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_threshold_reached() {
        let tracker = tracker(3);
        assert!(!tracker.record_failure("1.2.3.4"));
        assert!(!tracker.record_failure("1.2.3.4"));
        assert!(!tracker.is_suspicious("1.2.3.4"));
        assert!(tracker.record_failure("1.2.3.4"));
        assert!(tracker.is_suspicious("1.2.3.4"));
        assert!(!tracker.is_suspicious("5.6.7.8"));
    }

    #[test]
    fn test_clear_resets_ip() {
        let tracker = tracker(1);
        assert!(tracker.record_failure("1.2.3.4"));
        tracker.clear("1.2.3.4");
        assert!(!tracker.is_suspicious("1.2.3.4"));
    }
}
