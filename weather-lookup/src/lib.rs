//! Core library for the weather gateway.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and its OpenWeather implementation
//! - The geocode-then-fetch lookup service and its error taxonomy
//!
//! It is used by `weather-gateway`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::LookupError;
pub use model::{GeocodeResult, LocationQuery, WeatherPayload, WeatherQuery};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use service::WeatherLookupService;
