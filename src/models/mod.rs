//! Data models and schemas for the weather desk API.
//!
//! Provider payloads, the forecast domain types, request/response bodies and
//! the audit event structure all live here.

pub mod account;
pub mod api;
pub mod audit;
pub mod context;
pub mod weather;

pub use account::*;
pub use api::*;
pub use audit::*;
pub use context::*;
pub use weather::*;
