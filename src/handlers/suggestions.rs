//! City suggestion endpoint handler.

use super::common::enforce_rate_limit;
use crate::{
    models::{SuggestionQuery, SuggestionResponse},
    services::{SimpleRateLimiter, WeatherClient, city_resolver},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

#[api_v2_operation(
    summary = "City Suggestions",
    description = "Returns up to five city names resembling ?city=. Well-known cities are matched locally; the geocoding API is only asked when none match.",
    tags("Weather")
)]
pub async fn suggestions(
    req: HttpRequest,
    query: web::Query<SuggestionQuery>,
    client: web::Data<WeatherClient>,
    limiter: web::Data<SimpleRateLimiter>,
) -> Result<web::Json<SuggestionResponse>, Error> {
    enforce_rate_limit(&req, &limiter)?;

    let city = city_resolver::sanitize(query.city.as_deref());
    let suggestions = city_resolver::suggest(&city, &client).await;

    Ok(web::Json(SuggestionResponse {
        query: city,
        suggestions,
    }))
}
