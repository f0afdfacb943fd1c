//! Utility functions and helper modules.
//!
//! Request inspection (client IP, user agent, bearer token, request ID),
//! route labels for metrics and password digests.

pub mod http;
pub mod password;
pub mod route;

pub use http::*;
pub use password::PasswordDigest;
pub use route::*;
