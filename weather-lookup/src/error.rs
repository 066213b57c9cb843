use thiserror::Error;

/// Failure kinds of a single weather lookup.
///
/// The `Display` text of each variant is exactly what the HTTP surface sends
/// back to the caller as a plain-text body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The caller sent an unusable query.
    #[error("Error: {0}")]
    BadRequest(String),

    /// An upstream call produced no body.
    #[error("Error: {0}")]
    UpstreamUnavailable(String),

    /// Neither geocoding nor the name fallback resolved the city.
    #[error("Error: City not found in geocoding API and fallback also failed for: {city}")]
    NotFound { city: String },

    /// Anything else: transport faults, malformed upstream JSON.
    #[error("Error: {0}")]
    Internal(String),
}

impl LookupError {
    pub fn missing_city() -> Self {
        LookupError::BadRequest("'city' query param is required.".to_string())
    }

    pub fn geocoding_unavailable() -> Self {
        LookupError::UpstreamUnavailable("Unable to fetch geocoding data.".to_string())
    }

    pub fn weather_unavailable() -> Self {
        LookupError::UpstreamUnavailable("Unable to fetch weather data.".to_string())
    }

    pub fn city_not_found(city: impl Into<String>) -> Self {
        LookupError::NotFound { city: city.into() }
    }

    /// HTTP status code this failure maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::BadRequest(_) => 400,
            LookupError::NotFound { .. } => 404,
            LookupError::UpstreamUnavailable(_) => 502,
            LookupError::Internal(_) => 500,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Internal(err.to_string())
    }
}
