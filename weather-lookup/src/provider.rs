use crate::{Config, error::LookupError, model::WeatherQuery};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Raw access to the upstream geocoding and weather endpoints.
///
/// `Ok(None)` means the upstream answered successfully with an empty body.
/// Error statuses and transport faults are reported as `Err`.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocode `city`, returning the raw JSON array of matches.
    async fn geocode(&self, city: &str) -> Result<Option<String>, LookupError>;

    /// Current weather for `query`, returning the raw JSON document.
    async fn current_weather(&self, query: &WeatherQuery) -> Result<Option<String>, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        config.weather_api_base.clone(),
        config.geo_api_base.clone(),
    );

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
