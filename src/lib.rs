//! Weather Desk - city weather lookups with forecasts, suggestions and favorites
//!
//! An Actix Web + Paperclip service in front of the OpenWeatherMap API:
//! - current conditions by city name or coordinates
//! - 5-day forecasts grouped into daily summaries
//! - "did you mean" city suggestions for failed lookups
//! - in-memory accounts with per-user favorite cities
//! - Prometheus metrics, security headers, request IDs and audit logging
//!
//! ## Architecture
//!
//! - `models/` - provider payloads, domain types and request/response bodies
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - security headers, request IDs, metrics
//! - `services/` - forecast aggregation, city resolution, provider client, accounts
//! - `utils/` - request inspection and password digests
//! - `config/` - configuration structures and environment loading
//! - `state` - shared state built once at startup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use weather_desk::{AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_env().map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(&state))
//!         .bind("127.0.0.1:8000")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::{
    AuthConfig, MetricsConfig, RateLimitConfig, SecurityHeadersConfig, ServerConfig,
    WeatherApiConfig,
};
pub use handlers::{ApiError, create_app, create_openapi_spec};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders};
pub use models::{
    AuthAuditEvent, AuthEventOutcome, AuthEventType, DailySummary, ErrorResponse, PageContext,
    Units, WeatherSample,
};
pub use services::{
    AccountError, AccountStore, AppMetrics, FavoriteCityList, ProviderFailure, ProviderResult,
    SimpleRateLimiter, SuspiciousActivityTracker, WeatherClient, city_resolver, forecast,
};
pub use state::{AppState, StartupError};
pub use utils::{extract_client_ip, extract_route_pattern, extract_user_agent};
