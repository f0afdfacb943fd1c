//! Shared page context attached to page-level responses.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Current conditions for one of the caller's favorite cities
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct FavoriteWeather {
    pub city: String,
    /// Temperature with one decimal, without unit
    pub temp: String,
    pub status: String,
    pub icon: String,
}

/// Values every page shows regardless of which endpoint produced it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct PageContext {
    /// e.g. "Sunday, October 18, 2026"
    pub current_date: String,
    /// Empty for anonymous callers
    pub favorite_weather: Vec<FavoriteWeather>,
}
