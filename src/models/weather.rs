//! Weather models: provider payloads, forecast domain types and the
//! request/response bodies of the weather endpoints.

use super::PageContext;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Measurement system requested from the provider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Value of the provider's `units` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }

    /// Temperature unit letter shown next to values
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "F",
            Units::Metric => "C",
        }
    }

    /// Format a temperature with one decimal and its unit, e.g. `72.3°F`
    pub fn format_temperature(&self, value: f64) -> String {
        if !value.is_finite() {
            return "N/A".to_string();
        }
        format!("{value:.1}°{}", self.symbol())
    }
}

/// Upper-case the first character and lower-case the rest
/// (`"light RAIN"` becomes `"Light rain"`).
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Provider payloads (OpenWeatherMap)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CountryInfo {
    pub country: Option<String>,
}

/// Body of `/weather`
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    pub sys: Option<CountryInfo>,
}

impl CurrentWeather {
    /// "Los Angeles, US", or just the name when the country is unknown
    pub fn location_label(&self) -> String {
        match self.sys.as_ref().and_then(|sys| sys.country.as_deref()) {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    /// Capitalized description of the primary condition
    pub fn status(&self) -> String {
        self.weather
            .first()
            .map(|w| capitalize(&w.description))
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn icon(&self) -> String {
        self.weather
            .first()
            .map(|w| w.icon.clone())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub country: Option<String>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
}

impl ForecastCity {
    pub fn label(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// Body of `/forecast`
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

impl ForecastPayload {
    /// Convert provider entries into samples stamped with the city's UTC
    /// offset. Entries without a usable timestamp or condition are dropped.
    pub fn samples(&self) -> Vec<WeatherSample> {
        let offset = FixedOffset::east_opt(self.city.timezone).unwrap_or_else(|| Utc.fix());

        self.list
            .iter()
            .filter_map(|entry| {
                let Some(timestamp) = DateTime::from_timestamp(entry.dt, 0) else {
                    tracing::debug!(dt = entry.dt, "Dropping forecast entry with invalid timestamp");
                    return None;
                };
                let Some(condition) = entry.weather.first() else {
                    tracing::debug!(dt = entry.dt, "Dropping forecast entry without conditions");
                    return None;
                };

                Some(WeatherSample {
                    timestamp: timestamp.with_timezone(&offset),
                    temp_min: entry.main.temp_min,
                    temp_max: entry.main.temp_max,
                    description: capitalize(&condition.description),
                    icon: condition.icon.clone(),
                    humidity: entry.main.humidity,
                    wind_speed: entry.wind.speed,
                })
            })
            .collect()
    }
}

/// One entry of the geocoding API (`/direct` and `/reverse`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct CityCandidate {
    pub name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl CityCandidate {
    /// "Springfield, US"; the name alone when no country is reported
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Forecast domain
// ---------------------------------------------------------------------------

/// One provider-supplied 3-hour forecast data point
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSample {
    /// Observation time in the observation's local offset
    pub timestamp: DateTime<FixedOffset>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Aggregated conditions for one calendar day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct DailySummary {
    pub calendar_date: NaiveDate,
    /// e.g. "Monday, October 19"
    pub display_label: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

// ---------------------------------------------------------------------------
// Endpoint bodies
// ---------------------------------------------------------------------------

/// Query parameters for `/api/weather` and `/api/forecast`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherQuery {
    /// City name, e.g. "Kansas City"
    pub city: Option<String>,
    /// `imperial` (default) or `metric`
    pub units: Option<Units>,
}

/// Query parameters for `/api/location-weather`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct LocationQuery {
    /// Latitude in decimal degrees
    pub lat: Option<f64>,
    /// Longitude in decimal degrees
    pub lon: Option<f64>,
    pub units: Option<Units>,
}

/// Query parameters for `/api/context`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct UnitsQuery {
    pub units: Option<Units>,
}

/// Query parameters for `/api/suggestions`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct SuggestionQuery {
    pub city: Option<String>,
}

/// Current conditions for one place
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct CurrentWeatherResponse {
    /// Location name (e.g., "Los Angeles, US")
    pub location: String,
    /// Capitalized condition (e.g., "Clear sky")
    pub status: String,
    pub temp: f64,
    pub feels_like: f64,
    /// Formatted temperature (e.g., "72.3°F")
    pub temp_display: String,
    pub feels_like_display: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon: String,
    /// "F" or "C"
    pub units: String,
    pub context: PageContext,
}

impl CurrentWeatherResponse {
    pub fn from_current(
        weather: &CurrentWeather,
        location: String,
        units: Units,
        context: PageContext,
    ) -> Self {
        Self {
            location,
            status: weather.status(),
            temp: weather.main.temp,
            feels_like: weather.main.feels_like,
            temp_display: units.format_temperature(weather.main.temp),
            feels_like_display: units.format_temperature(weather.main.feels_like),
            humidity: weather.main.humidity,
            wind_speed: weather.wind.speed,
            icon: weather.icon(),
            units: units.symbol().to_string(),
            context,
        }
    }
}

/// Daily forecast for one city
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct ForecastResponse {
    pub city: String,
    pub forecasts: Vec<DailySummary>,
    pub units: String,
    pub context: PageContext,
}

#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct SuggestionResponse {
    /// The query after sanitizing
    pub query: String,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn entry(dt: i64, description: &str) -> serde_json::Value {
        serde_json::json!({
            "dt": dt,
            "main": {"temp": 10.0, "feels_like": 9.0, "temp_min": 8.0, "temp_max": 12.0, "humidity": 70},
            "weather": [{"main": "Rain", "description": description, "icon": "10d"}],
            "wind": {"speed": 3.5}
        })
    }

    #[test]
    fn test_units_formatting() {
        assert_eq!(Units::Imperial.format_temperature(72.345), "72.3°F");
        assert_eq!(Units::Metric.format_temperature(21.0), "21.0°C");
        assert_eq!(Units::Metric.format_temperature(f64::NAN), "N/A");
        assert_eq!(Units::default(), Units::Imperial);
        assert_eq!(Units::Metric.as_str(), "metric");
    }

    #[test]
    fn test_units_deserialize_lowercase() {
        let units: Units = serde_json::from_str("\"metric\"").unwrap();
        assert_eq!(units, Units::Metric);
        assert!(serde_json::from_str::<Units>("\"kelvin\"").is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("light RAIN"), "Light rain");
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_location_label() {
        let mut weather: CurrentWeather = serde_json::from_value(serde_json::json!({
            "name": "Los Angeles",
            "weather": [{"main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 20.0, "feels_like": 19.0, "temp_min": 18.0, "temp_max": 22.0, "humidity": 40},
            "wind": {"speed": 1.0},
            "sys": {"country": "US"}
        }))
        .unwrap();
        assert_eq!(weather.location_label(), "Los Angeles, US");
        assert_eq!(weather.status(), "Clear sky");

        weather.sys = None;
        assert_eq!(weather.location_label(), "Los Angeles");
    }

    #[test]
    fn test_samples_use_city_offset() {
        // 2024-01-01T23:00:00Z is already Jan 2 in UTC+2
        let payload: ForecastPayload = serde_json::from_value(serde_json::json!({
            "list": [entry(1_704_150_000, "light rain")],
            "city": {"name": "Athens", "country": "GR", "timezone": 7200}
        }))
        .unwrap();

        let samples = payload.samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp.hour(), 1);
        assert_eq!(
            samples[0].timestamp.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(samples[0].description, "Light rain");
    }

    #[test]
    fn test_samples_drop_entries_without_conditions() {
        let mut bare = entry(1_704_150_000, "x");
        bare["weather"] = serde_json::json!([]);
        let payload: ForecastPayload = serde_json::from_value(serde_json::json!({
            "list": [bare, entry(1_704_160_800, "clouds")],
            "city": {"name": "Oslo"}
        }))
        .unwrap();

        let samples = payload.samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].description, "Clouds");
    }

    #[test]
    fn test_candidate_display_name() {
        let candidate = CityCandidate {
            name: "Springfield".to_string(),
            country: Some("US".to_string()),
            state: Some("Illinois".to_string()),
            lat: 39.8,
            lon: -89.6,
        };
        assert_eq!(candidate.display_name(), "Springfield, US");

        let bare = CityCandidate { country: None, ..candidate };
        assert_eq!(bare.display_name(), "Springfield");
    }
}
