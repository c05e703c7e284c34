use chrono::Duration;
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::{Selection, DEFAULT_CATALOG_URL};
use crate::predict::{
    Observer, SearchSettings, DEFAULT_ALTITUDE_THRESHOLD_DEG, DEFAULT_MAGNITUDE_LIMIT,
    DEFAULT_WORKERS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid coordinates '{0}', expected \"lat, lon\" in degrees")]
    Coordinates(String),
    #[error("unknown timezone '{0}'")]
    Timezone(String),
    #[error("invalid duration for {field}: {message}")]
    Duration {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub observer: ObserverConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObserverConfig {
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub url: String,
    pub cache_file: PathBuf,
    /// Download a fresh copy before each run; otherwise read the cache only.
    pub refresh: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            cache_file: PathBuf::from("starlink.tle"),
            refresh: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub window: String,
    pub altitude_threshold_deg: f64,
    pub follow_up_window: String,
    pub min_duration: String,
    pub magnitude_limit: f64,
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            window: "4d".to_string(),
            altitude_threshold_deg: DEFAULT_ALTITUDE_THRESHOLD_DEG,
            follow_up_window: "10m".to_string(),
            min_duration: "3m".to_string(),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
            workers: DEFAULT_WORKERS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub one_per_train: bool,
    /// Explicit catalog numbers; when non-empty they replace train selection.
    pub satellites: Vec<u32>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            one_per_train: true,
            satellites: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn observer(&self) -> Result<Observer, ConfigError> {
        let timezone: Tz = self
            .observer
            .timezone
            .parse()
            .map_err(|_| ConfigError::Timezone(self.observer.timezone.clone()))?;
        Observer::from_coordinates(
            &self.observer.coordinates,
            self.observer.altitude_m,
            timezone,
        )
        .ok_or_else(|| ConfigError::Coordinates(self.observer.coordinates.clone()))
    }

    pub fn search_window(&self) -> Result<Duration, ConfigError> {
        parse_duration("search.window", &self.search.window)
    }

    pub fn search_settings(&self) -> Result<SearchSettings, ConfigError> {
        Ok(SearchSettings {
            altitude_threshold_deg: self.search.altitude_threshold_deg,
            follow_up_window: parse_duration(
                "search.follow_up_window",
                &self.search.follow_up_window,
            )?,
            min_pass_duration: parse_duration("search.min_duration", &self.search.min_duration)?,
            magnitude_limit: self.search.magnitude_limit,
        })
    }

    pub fn selection(&self) -> Selection {
        if !self.selection.satellites.is_empty() {
            Selection::Explicit(self.selection.satellites.clone())
        } else if self.selection.one_per_train {
            Selection::OnePerTrain
        } else {
            Selection::All
        }
    }
}

fn parse_duration(field: &'static str, s: &str) -> Result<Duration, ConfigError> {
    let std = humantime::parse_duration(s.trim()).map_err(|e| ConfigError::Duration {
        field,
        message: e.to_string(),
    })?;
    Duration::from_std(std).map_err(|e| ConfigError::Duration {
        field,
        message: e.to_string(),
    })
}
