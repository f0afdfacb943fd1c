//! Helpers shared by several handlers.

use super::ApiError;
use crate::{
    models::{PageContext, Units},
    services::{AccountStore, SimpleRateLimiter, WeatherClient, build_page_context},
    utils::http::{extract_bearer_token, extract_client_ip},
};
use actix_web::HttpRequest;
use chrono::Local;

/// Reject the request with 429 when the caller's IP is over budget
pub(crate) fn enforce_rate_limit(
    req: &HttpRequest,
    limiter: &SimpleRateLimiter,
) -> Result<(), ApiError> {
    let ip = extract_client_ip(req);
    if limiter.check_rate_limit(&ip) {
        Ok(())
    } else {
        tracing::warn!(ip_address = %ip, path = %req.path(), "Rate limit exceeded");
        Err(ApiError::rate_limited())
    }
}

/// Bearer token of the request, or 401
pub(crate) fn require_token(req: &HttpRequest) -> Result<String, ApiError> {
    extract_bearer_token(req)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
}

/// Page context for whoever is calling; anonymous or expired sessions get no
/// favorites.
pub(crate) async fn caller_context(
    req: &HttpRequest,
    accounts: &AccountStore,
    client: &WeatherClient,
    units: Units,
) -> PageContext {
    let favorites = extract_bearer_token(req)
        .and_then(|token| accounts.favorites(&token).ok())
        .unwrap_or_default();

    build_page_context(Local::now().date_naive(), &favorites, client, units).await
}
