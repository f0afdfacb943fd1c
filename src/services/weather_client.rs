//! OpenWeatherMap client.
//!
//! Every call is a single HTTP round trip bounded by the configured timeout:
//! no retries and no caching. Whatever goes wrong (non-2xx status, transport
//! error, undecodable body) comes back as a [`ProviderFailure`] so callers
//! branch on one result type instead of on raw transport errors.

use crate::config::WeatherApiConfig;
use crate::models::{CityCandidate, CurrentWeather, ForecastPayload, Units};
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use url::Url;

const SEARCH_LIMIT: &str = "5";

/// Normalized failure of a provider call.
///
/// `code` is the upstream HTTP status, or 500 when no usable response was
/// received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("weather provider error {code}: {message}")]
pub struct ProviderFailure {
    pub code: u16,
    pub message: String,
}

impl ProviderFailure {
    pub const TRANSPORT_CODE: u16 = 500;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Failure without an upstream status (connect error, timeout, bad body)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(Self::TRANSPORT_CODE, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == 404
    }
}

pub type ProviderResult<T> = Result<T, ProviderFailure>;

/// Prometheus metrics for provider calls
#[derive(Clone)]
pub struct WeatherClientMetrics {
    /// Calls by endpoint and outcome
    pub requests_total: CounterVec,
    /// Call duration by endpoint
    pub request_duration_seconds: HistogramVec,
}

impl WeatherClientMetrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "weather_provider_requests_total",
                "Total number of weather provider requests",
            ),
            &["endpoint", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "weather_provider_request_duration_seconds",
                "Weather provider request duration in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["endpoint"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
        })
    }
}

/// Client for the weather data and geocoding endpoints
#[derive(Clone)]
pub struct WeatherClient {
    http: Client,
    config: WeatherApiConfig,
    metrics: Option<WeatherClientMetrics>,
}

impl WeatherClient {
    pub fn new(
        config: WeatherApiConfig,
        metrics: Option<WeatherClientMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            config,
            metrics,
        })
    }

    /// Current conditions for a city
    pub async fn fetch_current(&self, city: &str, units: Units) -> ProviderResult<CurrentWeather> {
        let url = self.data_url("weather", &[("q", city), ("units", units.as_str())])?;
        self.get_json("current", url).await
    }

    /// 5-day / 3-hour forecast for a city
    pub async fn fetch_forecast(&self, city: &str, units: Units) -> ProviderResult<ForecastPayload> {
        let url = self.data_url("forecast", &[("q", city), ("units", units.as_str())])?;
        self.get_json("forecast", url).await
    }

    /// Current conditions at a coordinate
    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> ProviderResult<CurrentWeather> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let url = self.data_url(
            "weather",
            &[("lat", lat.as_str()), ("lon", lon.as_str()), ("units", units.as_str())],
        )?;
        self.get_json("coordinates", url).await
    }

    /// Nearest named place for a coordinate; 404 when the provider knows none
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> ProviderResult<CityCandidate> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let url = self.geo_url(
            "reverse",
            &[("lat", lat.as_str()), ("lon", lon.as_str()), ("limit", "1")],
        )?;
        let places: Vec<CityCandidate> = self.get_json("reverse_geocode", url).await?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| ProviderFailure::new(404, "Location not found"))
    }

    /// Up to five places whose name matches `query`
    pub async fn search(&self, query: &str) -> ProviderResult<Vec<CityCandidate>> {
        let url = self.geo_url("direct", &[("q", query), ("limit", SEARCH_LIMIT)])?;
        self.get_json("search", url).await
    }

    fn data_url(&self, path: &str, params: &[(&str, &str)]) -> ProviderResult<Url> {
        self.build_url(&self.config.base_url, path, params)
    }

    fn geo_url(&self, path: &str, params: &[(&str, &str)]) -> ProviderResult<Url> {
        self.build_url(&self.config.geo_base_url, path, params)
    }

    fn build_url(&self, base: &str, path: &str, params: &[(&str, &str)]) -> ProviderResult<Url> {
        let appid = ("appid", self.config.api_key.as_str());
        Url::parse_with_params(
            &format!("{base}/{path}"),
            params.iter().copied().chain(std::iter::once(appid)),
        )
        .map_err(|e| ProviderFailure::transport(format!("Invalid provider URL: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: Url) -> ProviderResult<T> {
        let start = Instant::now();
        let result = self.execute(endpoint, url).await;
        let duration = start.elapsed();

        let outcome = match &result {
            Ok(_) => "success",
            Err(failure) if failure.code == ProviderFailure::TRANSPORT_CODE => "transport_error",
            Err(_) => "upstream_error",
        };
        self.record(endpoint, outcome, duration);

        match &result {
            Ok(_) => info!(
                endpoint = %endpoint,
                duration_ms = duration.as_millis(),
                "Weather provider request completed"
            ),
            Err(failure) => error!(
                endpoint = %endpoint,
                code = failure.code,
                error = %failure.message,
                duration_ms = duration.as_millis(),
                "Weather provider request failed"
            ),
        }

        result
    }

    async fn execute<T: DeserializeOwned>(&self, endpoint: &str, url: Url) -> ProviderResult<T> {
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderFailure::transport("Weather service timed out")
            } else {
                // Strip the URL so the credential never reaches logs or clients
                ProviderFailure::transport(format!(
                    "Weather service unreachable: {}",
                    e.without_url()
                ))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected provider status")
                    .to_string()
            });
            warn!(endpoint = %endpoint, status = status.as_u16(), "Weather provider returned an error status");
            return Err(ProviderFailure::new(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderFailure::transport(format!("Failed to parse weather data: {}", e.without_url())))
    }

    fn record(&self, endpoint: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics
                .requests_total
                .with_label_values(&[endpoint, outcome])
                .inc();
            metrics
                .request_duration_seconds
                .with_label_values(&[endpoint])
                .observe(duration.as_secs_f64());
        }
    }
}

/// OpenWeatherMap error bodies look like `{"cod":"404","message":"city not found"}`
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
