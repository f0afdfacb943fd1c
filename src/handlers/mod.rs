//! HTTP request handlers for API endpoints.
//!
//! Each handler validates its input, calls the services it needs and answers
//! JSON. Failures are [`ApiError`] values rendered in one common shape.

pub mod auth;
mod common;
pub mod context;
pub mod error;
pub mod favorites;
pub mod forecast;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod suggestions;
pub mod version;
pub mod weather;

pub use auth::*;
pub use context::*;
pub use error::ApiError;
pub use favorites::*;
pub use forecast::*;
pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use suggestions::*;
pub use version::*;
pub use weather::*;
