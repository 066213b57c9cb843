use serde::{Deserialize, Serialize};

/// What the caller asked for: explicit coordinates or a free-text city name.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { latitude: f64, longitude: f64 },
    City(String),
}

/// One match from the geocoding endpoint. Unknown upstream fields are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Selector for the upstream current-weather endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Coordinates { lat: f64, lon: f64 },
    CityName(String),
}

/// Upstream weather document, relayed verbatim and never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherPayload(String);

impl WeatherPayload {
    pub fn new(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
