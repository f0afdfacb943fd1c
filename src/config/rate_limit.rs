//! Rate limiting configuration.

use super::env_or;

/// Request budget per client IP for the endpoints that call the weather
/// provider.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub requests_per_minute: usize,
    pub period_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            period_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            requests_per_minute: env_or("RATE_LIMIT_RPM", defaults.requests_per_minute),
            period_seconds: env_or("RATE_LIMIT_PERIOD", defaults.period_seconds),
        }
    }
}
