//! Configuration structures and loading utilities.
//!
//! Every concern gets its own struct with a `Default` and a `from_env()`
//! constructor. Configuration is read once at startup and handed to the
//! services that need it; nothing reads the environment per request.

pub mod auth;
pub mod metrics;
pub mod rate_limit;
pub mod security;
pub mod server;
pub mod weather;

pub use auth::*;
pub use metrics::*;
pub use rate_limit::*;
pub use security::*;
pub use server::*;
pub use weather::*;

use std::env;
use std::str::FromStr;

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag; only a case-insensitive `"true"` enables it.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
