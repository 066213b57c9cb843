use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use inquire::Password;
use weather_lookup::{Config, LocationQuery, WeatherLookupService, provider_from_config};

use crate::http;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-gateway", version, about = "OpenWeather lookup gateway")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Address to listen on, e.g. "0.0.0.0:8080". Overrides the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Look up current weather once and print the upstream JSON.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("location").required(true).args(["city", "lat"])))]
pub struct ShowArgs {
    /// City name, resolved through geocoding.
    #[arg(long)]
    pub city: Option<String>,

    /// Latitude; requires --lon.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude; requires --lat.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl ShowArgs {
    fn location(&self) -> anyhow::Result<LocationQuery> {
        match (&self.city, self.lat, self.lon) {
            (Some(city), _, _) => Ok(LocationQuery::City(city.clone())),
            (None, Some(latitude), Some(longitude)) => Ok(LocationQuery::Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(anyhow::anyhow!("Provide either --city or both --lat and --lon")),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let config = load_config(self.config.as_deref())?;
                let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());
                let service = build_service(&config)?;

                tracing::info!("Starting weather-gateway with {:?}", config);
                http::run_http_server(service, &bind_addr).await
            }
            Command::Configure => {
                let path = match &self.config {
                    Some(path) => path.clone(),
                    None => Config::config_file_path()?,
                };
                let mut config = Config::load_from(&path)?;

                let api_key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                config.set_api_key(api_key.trim().to_string());
                config.require_api_key()?;
                config.save_to(&path)?;

                println!("Saved API key to {}", path.display());
                Ok(())
            }
            Command::Show(args) => {
                let config = load_config(self.config.as_deref())?;
                let service = build_service(&config)?;
                let query = args.location()?;

                let payload = service
                    .lookup(&query)
                    .await
                    .map_err(|e| anyhow::anyhow!("{e} (HTTP {})", e.status_code()))?;

                println!("{}", payload.as_str());
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config.with_env_overrides())
}

fn build_service(config: &Config) -> anyhow::Result<WeatherLookupService> {
    let provider = provider_from_config(config)?;
    Ok(WeatherLookupService::new(Arc::from(provider)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_requires_a_location() {
        assert!(Cli::try_parse_from(["weather-gateway", "show"]).is_err());
    }

    #[test]
    fn show_lat_requires_lon() {
        assert!(Cli::try_parse_from(["weather-gateway", "show", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "weather-gateway",
            "show",
            "--lat",
            "-33.86",
            "--lon",
            "151.2",
        ])
        .expect("valid args");

        let Command::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(
            args.location().unwrap(),
            LocationQuery::Coordinates {
                latitude: -33.86,
                longitude: 151.2
            }
        );
    }

    #[test]
    fn show_city() {
        let cli = Cli::try_parse_from(["weather-gateway", "show", "--city", "Paris"])
            .expect("valid args");

        let Command::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.location().unwrap(), LocationQuery::City("Paris".into()));
    }

    #[test]
    fn serve_with_global_config() {
        let cli = Cli::try_parse_from([
            "weather-gateway",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--config",
            "/tmp/gw.toml",
        ])
        .expect("valid args");

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/gw.toml")));
        assert!(matches!(cli.command, Command::Serve { bind: Some(ref b) } if b == "0.0.0.0:9000"));
    }
}
