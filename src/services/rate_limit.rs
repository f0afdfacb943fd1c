//! Fixed-window request limiter keyed by client IP.

use crate::config::RateLimitConfig;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Simple in-memory rate limiter
///
/// Each key gets `requests_per_minute` requests per `period_seconds` window;
/// the window restarts on the first request after it expires.
#[derive(Clone)]
pub struct SimpleRateLimiter {
    config: RateLimitConfig,
    storage: Arc<Mutex<HashMap<String, (usize, Instant)>>>,
}

impl SimpleRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` if the request should be allowed, `false` if rate limited.
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let period = Duration::from_secs(self.config.period_seconds);

        storage.retain(|_, (_, started)| now.duration_since(*started) < period);

        match storage.get_mut(key) {
            Some((count, _)) if *count >= self.config.requests_per_minute => false,
            Some((count, _)) => {
                *count += 1;
                true
            }
            None => {
                storage.insert(key.to_string(), (1, now));
                true
            }
        }
    }
}
