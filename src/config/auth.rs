//! Account and login configuration.

use super::env_or;

/// Registration rules and login-failure tracking thresholds.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Minimum password length accepted at registration
    pub min_password_length: usize,
    /// Failed logins from one IP before the login endpoint starts refusing
    pub max_failures: usize,
    /// Window (seconds) over which failed logins are counted
    pub failure_window_seconds: u64,
    /// Lifetime (seconds) of a login session's bearer token
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            max_failures: 5,
            failure_window_seconds: 300, // 5 minutes
            session_ttl_seconds: 86_400, // 24 hours
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_password_length: env_or(
                "AUTH_MIN_PASSWORD_LENGTH",
                defaults.min_password_length,
            ),
            max_failures: env_or("AUTH_MAX_FAILURES", defaults.max_failures),
            failure_window_seconds: env_or(
                "AUTH_FAILURE_WINDOW",
                defaults.failure_window_seconds,
            ),
            session_ttl_seconds: env_or("AUTH_SESSION_TTL", defaults.session_ttl_seconds),
        }
    }
}
