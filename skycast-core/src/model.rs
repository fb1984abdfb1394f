use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// City and country block attached to both weather payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// One weather observation or forecast point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Condition group, e.g. "Clouds".
    pub weather: String,
    pub description: String,
    pub weather_icon: String,
    /// Unix timestamp. Forecast entries occasionally arrive without one;
    /// those are excluded from day grouping.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub dt_txt: Option<String>,
}

/// Current conditions: a location plus a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub weather: WeatherSample,
}

/// Multi-day forecast: a location plus the raw sample list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastWeather {
    pub location: Location,
    pub weather: Vec<WeatherSample>,
}

/// Response envelope every backend endpoint wraps its payload in.
///
/// The HTTP status line is not part of the contract; the body `status`
/// is. Error bodies omit `data` entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload. A non-200 body status is an application-level
    /// error carrying the server's status and message verbatim (the
    /// message may be empty; callers apply their own fallback text). A
    /// 200 body without `data` is malformed and maps to the generic
    /// error.
    pub fn into_data(self) -> Result<T, ApiError> {
        if self.status != 200 {
            return Err(ApiError { status: self.status, message: self.message });
        }

        self.data.ok_or_else(ApiError::generic)
    }
}

/// Flag image URL for an ISO country code.
pub fn flag_url(country: &str) -> String {
    format!("https://flagcdn.com/{}.svg", country.to_lowercase())
}

/// Icon image URL for an OpenWeather icon code.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}.png")
}

impl CurrentWeather {
    /// Rewrite asset references in place: country code to flag URL, icon
    /// code to icon URL. Applied exactly once, right after a successful
    /// fetch and before the value is stored.
    pub fn rewrite_assets(&mut self) {
        self.location.country = flag_url(&self.location.country);
        self.weather.weather_icon = icon_url(&self.weather.weather_icon);
    }
}
