//! Layered configuration: optional config files, then `TRIP_PLANNER__*` environment variables.

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Number of actix workers, actix picks its own default when unset.
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3001,
            workers: None,
        }
    }
}

/// Where the city catalog comes from. With no paths the built-in example cities are served.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub cities_csv: Option<PathBuf>,
    pub foods_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TripSettings {
    /// City that `/api/cities/distances` measures from.
    pub reference_city: String,
}

impl Default for TripSettings {
    fn default() -> Self {
        TripSettings {
            reference_city: "Berlin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub trips: TripSettings,
    pub log: LogSettings,
}

impl Settings {
    pub fn load() -> Result<Settings> {
        dotenvy::dotenv().ok();

        let profile = env::var("TRIP_PLANNER_ENV").unwrap_or_else(|_| "development".to_string());
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            .add_source(
                Environment::with_prefix("TRIP_PLANNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }

        if self.catalog.cities_csv.is_some() != self.catalog.foods_csv.is_some() {
            bail!("catalog.cities_csv and catalog.foods_csv must be set together");
        }

        if self.trips.reference_city.trim().is_empty() {
            bail!("trips.reference_city cannot be empty");
        }

        if self.server.workers == Some(0) {
            bail!("server.workers must be at least 1");
        }

        Ok(())
    }
}
