//! Current temperature lookup through the Open-Meteo APIs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::tools::{ErrorStrategy, Tool};
use crate::core::ToolError;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DEFAULT_CITY: &str = "Dayton";
const DEFAULT_COORDINATES: (f64, f64) = (39.7589478, -84.1916069);

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub temperature_2m: Option<f64>,
}

/// City part of a `"City, State"` location, `Dayton` when there is none.
pub fn city_from_location(location: &str) -> String {
    location
        .split(',')
        .map(str::trim)
        .find(|part| !part.is_empty())
        .unwrap_or(DEFAULT_CITY)
        .to_string()
}

/// Latitude and longitude of the first geocoding hit, or Dayton's.
pub fn coordinates(geocode: &GeocodeResponse) -> (f64, f64) {
    match geocode.results.first() {
        Some(GeocodeResult {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }) => (*latitude, *longitude),
        _ => DEFAULT_COORDINATES,
    }
}

pub fn temperature_text(forecast: &ForecastResponse) -> String {
    forecast
        .current
        .as_ref()
        .and_then(|current| current.temperature_2m)
        .map_or_else(|| "unknown".to_string(), |t| t.to_string())
}

/// `get_the_weather`: current temperature in Fahrenheit for a location.
#[derive(Debug, Clone)]
pub struct WeatherLookupTool {
    http: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherLookupTool {
    pub fn new() -> Self {
        Self::with_endpoints(GEOCODING_URL, FORECAST_URL)
    }

    pub fn with_endpoints(geocoding_url: &str, forecast_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
        }
    }

    pub async fn lookup(&self, location: &str) -> Result<String, ToolError> {
        let city = city_from_location(location);
        let geocode: GeocodeResponse = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city.as_str()), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let (latitude, longitude) = coordinates(&geocode);
        tracing::debug!(%city, latitude, longitude, "geocoded location");

        let forecast: ForecastResponse = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(temperature_text(&forecast))
    }
}

impl Default for WeatherLookupTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WeatherLookupTool {
    fn name(&self) -> &str {
        "get_the_weather"
    }

    fn description(&self) -> &str {
        "This is a tool that returns the weather of a specific location. It returns the temperature in fahrenheit."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "the location (i.e. Dayton, Ohio)"
                }
            },
            "required": ["location"]
        })
    }

    async fn call(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        let location = arguments
            .get("location")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::Format(format!("expected a 'location' string, got {arguments}")))?;
        self.lookup(location).await
    }

    fn error_strategy(&self) -> ErrorStrategy {
        ErrorStrategy::ReturnToModel
    }

    fn max_retries(&self) -> u32 {
        2
    }
}
