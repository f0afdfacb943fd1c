//! Current-conditions endpoint handlers.

use super::{
    ApiError,
    common::{caller_context, enforce_rate_limit},
};
use crate::{
    models::{CurrentWeatherResponse, LocationQuery, WeatherQuery},
    services::{AccountStore, SimpleRateLimiter, WeatherClient, city_resolver},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Current weather for a city
///
/// The city name is sanitized first. An unknown city answers 404 with up to
/// five alternative names.
#[api_v2_operation(
    summary = "Current Weather",
    description = "Returns current conditions for ?city= in imperial (default) or metric units. Unknown cities answer 404 with suggestions.",
    tags("Weather")
)]
pub async fn weather(
    req: HttpRequest,
    query: web::Query<WeatherQuery>,
    client: web::Data<WeatherClient>,
    accounts: web::Data<AccountStore>,
    limiter: web::Data<SimpleRateLimiter>,
) -> Result<web::Json<CurrentWeatherResponse>, Error> {
    enforce_rate_limit(&req, &limiter)?;

    let city = city_resolver::sanitize(query.city.as_deref());
    if city.is_empty() {
        return Err(ApiError::BadRequest("Please enter a city name".to_string()).into());
    }
    let units = query.units.unwrap_or_default();

    let current = match client.fetch_current(&city, units).await {
        Ok(current) => current,
        Err(failure) if failure.is_not_found() => {
            let suggestions = city_resolver::suggest(&city, &client).await;
            tracing::info!(city = %city, suggestions = suggestions.len(), "City not found");
            return Err(ApiError::CityNotFound {
                message: failure.message,
                suggestions,
            }
            .into());
        }
        Err(failure) => {
            tracing::error!(city = %city, code = failure.code, error = %failure.message, "Weather lookup failed");
            return Err(ApiError::WeatherUnavailable.into());
        }
    };

    let context = caller_context(&req, &accounts, &client, units).await;
    let location = current.location_label();

    Ok(web::Json(CurrentWeatherResponse::from_current(
        &current, location, units, context,
    )))
}

/// Current weather at a coordinate
///
/// The location label comes from reverse geocoding when available and falls
/// back to the name in the weather payload.
#[api_v2_operation(
    summary = "Weather By Location",
    description = "Returns current conditions for ?lat=&lon= (decimal degrees). Both are required.",
    tags("Weather")
)]
pub async fn location_weather(
    req: HttpRequest,
    query: web::Query<LocationQuery>,
    client: web::Data<WeatherClient>,
    accounts: web::Data<AccountStore>,
    limiter: web::Data<SimpleRateLimiter>,
) -> Result<web::Json<CurrentWeatherResponse>, Error> {
    enforce_rate_limit(&req, &limiter)?;

    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(ApiError::BadRequest("Latitude and longitude are required".to_string()).into());
    };
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::BadRequest("Latitude must be between -90 and 90".to_string()).into());
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(
            ApiError::BadRequest("Longitude must be between -180 and 180".to_string()).into(),
        );
    }
    let units = query.units.unwrap_or_default();

    let current = client
        .fetch_by_coordinates(lat, lon, units)
        .await
        .map_err(|failure| {
            tracing::error!(lat, lon, code = failure.code, error = %failure.message, "Coordinate lookup failed");
            ApiError::NotFound("Could not get weather for your location".to_string())
        })?;

    let location = match client.reverse_geocode(lat, lon).await {
        Ok(place) => place.display_name(),
        Err(failure) => {
            tracing::debug!(code = failure.code, "Reverse geocoding unavailable, using weather payload name");
            current.location_label()
        }
    };

    let context = caller_context(&req, &accounts, &client, units).await;

    Ok(web::Json(CurrentWeatherResponse::from_current(
        &current, location, units, context,
    )))
}
