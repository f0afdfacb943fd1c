//! Weather provider configuration.

use super::env_or;
use std::{env, fmt};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEO_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Credential and endpoints for the OpenWeatherMap API.
///
/// Built once at startup and passed into [`crate::services::WeatherClient::new`].
#[derive(Clone)]
pub struct WeatherApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub geo_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl fmt::Debug for WeatherApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("geo_base_url", &self.geo_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl WeatherApiConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();

        if api_key.is_empty() {
            tracing::warn!(
                "OPENWEATHER_API_KEY is not set; provider calls will be rejected upstream"
            );
        }

        let base_url = env::var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let geo_base_url = env::var("OPENWEATHER_GEO_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEO_BASE_URL.to_string());

        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            geo_base_url: geo_base_url.trim_end_matches('/').to_string(),
            timeout_seconds: env_or("WEATHER_API_TIMEOUT_SECONDS", 10),
        }
    }

    /// Point both the data and geocoding endpoints at one host, as the tests
    /// do with a mock server.
    pub fn with_base(api_key: &str, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_key: api_key.to_string(),
            base_url: format!("{base}/data/2.5"),
            geo_base_url: format!("{base}/geo/1.0"),
            ..Self::default()
        }
    }
}
