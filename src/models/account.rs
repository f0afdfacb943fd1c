//! Account, session and favorite-city request/response models.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Registration form. Every field is optional on the wire so that missing
/// fields produce a validation message instead of a decode error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct RegisterResponse {
    pub username: String,
    pub message: String,
}

/// Request model for user login
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response model for login attempts
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: String,
}

/// Body of `/api/favorites/toggle`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct FavoriteToggleRequest {
    pub city: Option<String>,
}

/// What a toggle did to the list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteToggle {
    Added,
    Removed,
}

#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct FavoriteToggleResponse {
    pub status: FavoriteToggle,
}

#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}
