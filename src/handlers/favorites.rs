//! Favorite-city endpoint handlers.

use super::{ApiError, common::require_token};
use crate::{
    models::{FavoriteToggleRequest, FavoriteToggleResponse, FavoritesResponse},
    services::{AccountStore, city_resolver},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

#[api_v2_operation(
    summary = "List Favorites",
    description = "Returns the caller's favorite cities in the order they were added.",
    tags("Favorites")
)]
pub async fn list_favorites(
    req: HttpRequest,
    accounts: web::Data<AccountStore>,
) -> Result<web::Json<FavoritesResponse>, Error> {
    let token = require_token(&req)?;
    let favorites = accounts.favorites(&token).map_err(ApiError::from)?;

    Ok(web::Json(FavoritesResponse { favorites }))
}

/// Add the city when absent, remove it when present
#[api_v2_operation(
    summary = "Toggle Favorite",
    description = "Adds {\"city\"} to the caller's favorites, or removes it if already saved. Answers {\"status\": \"added\" | \"removed\"}.",
    tags("Favorites")
)]
pub async fn toggle_favorite(
    req: HttpRequest,
    payload: web::Json<FavoriteToggleRequest>,
    accounts: web::Data<AccountStore>,
) -> Result<web::Json<FavoriteToggleResponse>, Error> {
    let token = require_token(&req)?;

    let city = city_resolver::sanitize(payload.city.as_deref());
    if city.is_empty() {
        return Err(ApiError::BadRequest("City name is required".to_string()).into());
    }

    let status = accounts
        .toggle_favorite(&token, &city)
        .map_err(ApiError::from)?;
    tracing::info!(city = %city, status = ?status, "Favorite toggled");

    Ok(web::Json(FavoriteToggleResponse { status }))
}
