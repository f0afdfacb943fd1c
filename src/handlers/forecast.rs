//! Daily forecast endpoint handler.

use super::{
    ApiError,
    common::{caller_context, enforce_rate_limit},
};
use crate::{
    models::{ForecastResponse, WeatherQuery},
    services::{AccountStore, SimpleRateLimiter, WeatherClient, city_resolver, forecast},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Five-day forecast grouped into daily summaries
#[api_v2_operation(
    summary = "Daily Forecast",
    description = "Groups the provider's 3-hour forecast for ?city= into one summary per calendar day, in first-seen order.",
    tags("Weather")
)]
pub async fn forecast(
    req: HttpRequest,
    query: web::Query<WeatherQuery>,
    client: web::Data<WeatherClient>,
    accounts: web::Data<AccountStore>,
    limiter: web::Data<SimpleRateLimiter>,
) -> Result<web::Json<ForecastResponse>, Error> {
    enforce_rate_limit(&req, &limiter)?;

    let city = city_resolver::sanitize(query.city.as_deref());
    if city.is_empty() {
        return Err(ApiError::BadRequest("Please enter a city name".to_string()).into());
    }
    let units = query.units.unwrap_or_default();

    let payload = match client.fetch_forecast(&city, units).await {
        Ok(payload) => payload,
        Err(failure) if failure.is_not_found() => {
            let suggestions = city_resolver::suggest(&city, &client).await;
            return Err(ApiError::CityNotFound {
                message: failure.message,
                suggestions,
            }
            .into());
        }
        Err(failure) => {
            tracing::error!(city = %city, code = failure.code, error = %failure.message, "Forecast lookup failed");
            return Err(ApiError::WeatherUnavailable.into());
        }
    };

    let samples = payload.samples();
    let forecasts = forecast::aggregate(&samples);
    tracing::debug!(
        city = %city,
        samples = samples.len(),
        days = forecasts.len(),
        "Aggregated forecast"
    );

    let context = caller_context(&req, &accounts, &client, units).await;

    Ok(web::Json(ForecastResponse {
        city: payload.city.label(),
        forecasts,
        units: units.symbol().to_string(),
        context,
    }))
}
