use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_WEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_GEO_API_BASE: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_WEATHER_API_BASE: &str = "WEATHER_API_BASE";
pub const ENV_GEO_API_BASE: &str = "GEO_API_BASE";
pub const ENV_BIND_ADDR: &str = "WEATHER_GATEWAY_BIND";

/// Gateway configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// bind_addr = "0.0.0.0:8080"
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key. There is no built-in fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_weather_api_base")]
    pub weather_api_base: String,

    #[serde(default = "default_geo_api_base")]
    pub geo_api_base: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_weather_api_base() -> String {
    DEFAULT_WEATHER_API_BASE.to_string()
}

fn default_geo_api_base() -> String {
    DEFAULT_GEO_API_BASE.to_string()
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            weather_api_base: default_weather_api_base(),
            geo_api_base: default_geo_api_base(),
            bind_addr: default_bind_addr(),
        }
    }
}

// Keeps the key out of logs and panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("weather_api_base", &self.weather_api_base)
            .field("geo_api_base", &self.geo_api_base)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-gateway")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply environment overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(base) = get(ENV_WEATHER_API_BASE) {
            self.weather_api_base = base;
        }
        if let Some(base) = get(ENV_GEO_API_BASE) {
            self.geo_api_base = base;
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }

        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the API key or an error telling the user how to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather-gateway configure` or set {ENV_API_KEY}."
                )
            })
    }
}
