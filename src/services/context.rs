//! Page context shared by page-level responses.

use crate::models::{FavoriteWeather, PageContext, Units};
use crate::services::weather_client::WeatherClient;
use chrono::NaiveDate;

const CURRENT_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Render `today` and fetch current conditions for each favorite city.
///
/// Cities whose lookup fails are left out. An empty `favorites` slice makes
/// no upstream calls.
pub async fn build_page_context(
    today: NaiveDate,
    favorites: &[String],
    client: &WeatherClient,
    units: Units,
) -> PageContext {
    let mut favorite_weather = Vec::with_capacity(favorites.len());

    for city in favorites {
        match client.fetch_current(city, units).await {
            Ok(current) => favorite_weather.push(FavoriteWeather {
                city: city.clone(),
                temp: format!("{:.1}", current.main.temp),
                status: current.status(),
                icon: current.icon(),
            }),
            Err(failure) => {
                tracing::debug!(
                    city = %city,
                    code = failure.code,
                    "Skipping favorite city without current weather"
                );
            }
        }
    }

    PageContext {
        current_date: format_current_date(today),
        favorite_weather,
    }
}

pub fn format_current_date(today: NaiveDate) -> String {
    today.format(CURRENT_DATE_FORMAT).to_string()
}
