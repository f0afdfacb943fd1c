//! Business logic and service layer modules.
//!
//! Forecast aggregation, city-name resolution, the weather provider client,
//! accounts and favorites, plus the rate limiter, login-failure tracker and
//! metrics registry shared by the handlers.

pub mod accounts;
pub mod city_resolver;
pub mod context;
pub mod favorites;
pub mod forecast;
pub mod metrics;
pub mod rate_limit;
pub mod suspicious_activity;
pub mod weather_client;

pub use accounts::{AccountError, AccountStore, Registration};
pub use context::build_page_context;
pub use favorites::FavoriteCityList;
pub use metrics::*;
pub use rate_limit::*;
pub use suspicious_activity::*;
pub use weather_client::{ProviderFailure, ProviderResult, WeatherClient, WeatherClientMetrics};
