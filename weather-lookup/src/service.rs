//! Geocode-then-fetch lookup.
//!
//! A city lookup makes at most two upstream calls: geocoding, then current
//! weather for the first match. When geocoding has no match the weather
//! endpoint is queried by name once instead.

use std::sync::Arc;

use crate::{
    error::LookupError,
    model::{GeocodeResult, LocationQuery, WeatherPayload, WeatherQuery},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct WeatherLookupService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookupService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn lookup(&self, query: &LocationQuery) -> Result<WeatherPayload, LookupError> {
        match query {
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => self.fetch_by_coordinates(*latitude, *longitude).await,
            LocationQuery::City(city) => self.fetch_by_city(city).await,
        }
    }

    /// Current weather at `lat`/`lon`. No range validation is applied.
    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherPayload, LookupError> {
        tracing::info!("Fetching weather for coordinates: {}, {}", lat, lon);

        self.provider
            .current_weather(&WeatherQuery::Coordinates { lat, lon })
            .await?
            .map(WeatherPayload::new)
            .ok_or_else(LookupError::weather_unavailable)
    }

    /// Current weather for a city name, resolved through geocoding.
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherPayload, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::missing_city());
        }

        tracing::info!("Geocoding city: {}", city);

        let geo_json = self
            .provider
            .geocode(city)
            .await?
            .ok_or_else(LookupError::geocoding_unavailable)?;

        let places: Vec<GeocodeResult> = serde_json::from_str(&geo_json)?;

        match places.first() {
            Some(place) => {
                tracing::debug!(
                    "Geocoded '{}' to {} ({}) at {}, {}",
                    city,
                    place.name,
                    place.country,
                    place.latitude,
                    place.longitude
                );
                self.fetch_by_coordinates(place.latitude, place.longitude)
                    .await
            }
            None => {
                tracing::info!("No geocoding match for '{}', falling back to name lookup", city);

                self.provider
                    .current_weather(&WeatherQuery::CityName(city.to_string()))
                    .await?
                    .map(WeatherPayload::new)
                    .ok_or_else(|| LookupError::city_not_found(city))
            }
        }
    }
}
