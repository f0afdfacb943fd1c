//! Shared application state assembled once at startup.

use crate::config::{
    AuthConfig, MetricsConfig, RateLimitConfig, SecurityHeadersConfig, WeatherApiConfig,
};
use crate::services::{
    AccountStore, AppMetrics, SimpleRateLimiter, SuspiciousActivityTracker, WeatherClient,
    WeatherClientMetrics,
};
use actix_web::web;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Every service the handlers reach through `web::Data`.
///
/// Cloning is cheap; each field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub weather: web::Data<WeatherClient>,
    pub accounts: web::Data<AccountStore>,
    pub limiter: web::Data<SimpleRateLimiter>,
    pub login_tracker: web::Data<SuspiciousActivityTracker>,
    pub metrics: web::Data<AppMetrics>,
    pub metrics_config: web::Data<MetricsConfig>,
    pub security: SecurityHeadersConfig,
}

impl AppState {
    /// Build from environment variables
    pub fn from_env() -> Result<Self, StartupError> {
        Self::new(
            WeatherApiConfig::from_env(),
            RateLimitConfig::from_env(),
            AuthConfig::from_env(),
            MetricsConfig::from_env(),
            SecurityHeadersConfig::from_env(),
        )
    }

    /// Default settings except for the weather provider; used by tests
    pub fn with_weather_config(weather: WeatherApiConfig) -> Result<Self, StartupError> {
        Self::new(
            weather,
            RateLimitConfig::default(),
            AuthConfig::default(),
            MetricsConfig::default(),
            SecurityHeadersConfig::default(),
        )
    }

    pub fn new(
        weather: WeatherApiConfig,
        rate_limit: RateLimitConfig,
        auth: AuthConfig,
        metrics_config: MetricsConfig,
        security: SecurityHeadersConfig,
    ) -> Result<Self, StartupError> {
        let metrics = AppMetrics::new()?;
        let client_metrics = WeatherClientMetrics::new(&metrics.registry)?;
        let weather = WeatherClient::new(weather, Some(client_metrics))?;

        Ok(Self {
            weather: web::Data::new(weather),
            accounts: web::Data::new(AccountStore::new(auth.clone())?),
            limiter: web::Data::new(SimpleRateLimiter::new(rate_limit)),
            login_tracker: web::Data::new(SuspiciousActivityTracker::new(&auth)),
            metrics: web::Data::new(metrics),
            metrics_config: web::Data::new(metrics_config),
            security,
        })
    }
}
