use async_trait::async_trait;
use reqwest::Client;

use crate::{error::LookupError, model::WeatherQuery};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    weather_api_base: String,
    geo_api_base: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("weather_api_base", &self.weather_api_base)
            .field("geo_api_base", &self.geo_api_base)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, weather_api_base: String, geo_api_base: String) -> Self {
        Self::with_client(Client::new(), api_key, weather_api_base, geo_api_base)
    }

    pub fn with_client(
        http: Client,
        api_key: String,
        weather_api_base: String,
        geo_api_base: String,
    ) -> Self {
        Self {
            api_key,
            weather_api_base,
            geo_api_base,
            http,
        }
    }

    /// GET `url` with `params` plus the API key. A successful response with an
    /// empty body comes back as `None`; a non-success status is an error
    /// carrying the status and the upstream message.
    async fn fetch_body(
        &self,
        what: &str,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Option<String>, LookupError> {
        let res = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body)
            );
            return Err(LookupError::Internal(format!("{status}: {}", truncate_body(&body))));
        }

        if body.is_empty() {
            tracing::warn!("OpenWeather {} request returned an empty body", what);
            return Ok(None);
        }

        Ok(Some(body))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(&self, city: &str) -> Result<Option<String>, LookupError> {
        let params = [("q", city.to_string()), ("limit", "1".to_string())];
        self.fetch_body("geocoding", &self.geo_api_base, &params).await
    }

    async fn current_weather(&self, query: &WeatherQuery) -> Result<Option<String>, LookupError> {
        let mut params = match query {
            WeatherQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
            WeatherQuery::CityName(name) => vec![("q", name.clone())],
        };
        params.push(("units", "metric".to_string()));

        self.fetch_body("current weather", &self.weather_api_base, &params)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("{\"cod\":401}"), "{\"cod\":401}");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn debug_hides_api_key() {
        let provider = OpenWeatherProvider::new(
            "SECRET".into(),
            "http://weather".into(),
            "http://geo".into(),
        );
        assert!(!format!("{provider:?}").contains("SECRET"));
    }
}
