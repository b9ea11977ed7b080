//! # Configuration Management

//! This module handles configuration loading and management for the LFD reconciliation engine.
//! It leverages the `config` crate to provide a flexible and structured way to define and access configuration settings from various sources, including:

//! * YAML configuration files (default.yaml plus an environment-specific overlay)
//! * Environment variables prefixed with `APP`

//! The core of this module is the `Settings` struct, which encapsulates the provider endpoints,
//! credentials, and logging settings required by the engine.

use serde::Deserialize;
use config::{Config, Environment, File};
use std::{env, fmt};
use std::path::PathBuf;
use secrecy::{Secret, ExposeSecret};
use log::debug;
use url::Url;
use crate::errors::ReconEngineError;

/// Represents the complete set of configuration settings for the reconciliation engine.
/// It's populated by reading from various configuration sources and provides convenient access to the settings throughout the engine.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Settings for the live container-tracking API provider
    pub live_api: LiveApiSettings,
    /// Settings for the internal database provider service
    pub internal_db: InternalDbSettings,
    /// Settings for application logging
    pub logging: LoggingSettings,
}

/// # Live API Provider Settings

/// This struct holds the settings required to reach the live container-tracking API.
#[derive(Debug, Deserialize, Clone)]
pub struct LiveApiSettings {
    /// The base URL of the live API service
    pub base_url: String,
    /// The route, relative to the base URL, that serves container tracking lookups
    pub tracking_route: String,
    /// The API key sent with each request (optional for unauthenticated sandboxes)
    #[serde(deserialize_with = "deserialize_optional_secret", default)]
    pub api_key: Option<Secret<String>>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

/// # Internal Database Provider Settings

/// This struct holds the settings required to reach the internal shipment-record service.
#[derive(Debug, Deserialize, Clone)]
pub struct InternalDbSettings {
    /// The base URL of the internal record service
    pub base_url: String,
    /// The route, relative to the base URL, that serves shipment record lookups
    pub shipments_route: String,
    /// The bearer token used to authenticate against the internal service
    #[serde(deserialize_with = "deserialize_optional_secret", default)]
    pub service_token: Option<Secret<String>>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Settings controlling engine logging output.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// The default log level when `RUST_LOG` is not set
    pub level: String,
    /// The directory where the rolling log file should be created, if file logging is desired
    pub path: Option<PathBuf>,
}

impl LiveApiSettings {
    /// Builds the full lookup endpoint URL for the live API provider.
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` if the configured base URL and route combine into a valid URL
    /// * `Err(ReconEngineError)` if the configuration does not parse as a URL
    pub fn tracking_endpoint(&self) -> Result<Url, ReconEngineError> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&self.tracking_route)?)
    }

    /// Exposes the configured API key, if any, for request construction.
    pub fn api_key_value(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| key.expose_secret().clone())
    }
}

impl InternalDbSettings {
    /// Builds the full lookup endpoint URL for the internal record service.
    pub fn shipments_endpoint(&self) -> Result<Url, ReconEngineError> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&self.shipments_route)?)
    }

    /// Exposes the configured service token, if any, for request construction.
    pub fn service_token_value(&self) -> Option<String> {
        self.service_token.as_ref().map(|token| token.expose_secret().clone())
    }
}

/// # Settings Initialization
///
/// The `Settings` implementation provides a `new` function to load and construct the configuration settings.
impl Settings {
    /// Loads and constructs the engine settings from various configuration sources.
    ///
    /// This function reads configuration settings from the following sources, in order of precedence:
    ///
    /// 1. `default.yaml`: Contains default settings for the engine
    /// 2. Environment-specific YAML file (e.g., `development.yaml` or `production.yaml`) based on the `RUN_MODE` environment variable
    /// 3. Environment variables prefixed with `APP` (e.g., `APP__LIVE_API__BASE_URL`)
    ///
    /// The `CONFIG_DIR` environment variable can be used to specify the directory where the YAML configuration files are located (defaults to "config").
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)`: If the settings were loaded and constructed successfully
    /// * `Err(ReconEngineError)`: If there was an error during the loading or construction process
    pub fn new() -> Result<Self, ReconEngineError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into());
        debug!("Run Mode: {:?}, Config Dir: {:?}", run_mode, config_dir);

        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut s: Self = s.try_deserialize::<Settings>()
            .map_err(ReconEngineError::from)?;

        if let Some(ref mut path) = s.logging.path {
            *path = env::current_dir()?.join(path.clone());
        }

        Ok(s)
    }
}

/// Deserializes a secret string from configuration into a `Secret<String>`
fn deserialize_optional_secret<'de, D>(deserializer: D) -> Result<Option<Secret<String>>, D::Error>
    where
        D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(Secret::new))
}

impl fmt::Display for LiveApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LiveApiSettings {{ base_url: {}, tracking_route: {}, timeout_ms: {} }}",
            self.base_url, self.tracking_route, self.timeout_ms
        )
    }
}

impl fmt::Display for InternalDbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InternalDbSettings {{ base_url: {}, shipments_route: {}, timeout_ms: {} }}",
            self.base_url, self.shipments_route, self.timeout_ms
        )
    }
}
