//! Application configuration.
//!
//! Values come from an optional `ron` file, then from the command line (which
//! also covers the `CONTACT_ENDPOINT` environment variable). Every key has a
//! default, so an empty file or no file at all is valid.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use contact_engine::{
    parse_endpoint, SubmitSettings, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_ENDPOINT,
    DEFAULT_REQUEST_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "contact_app.ron";
pub const ENDPOINT_ENV: &str = "CONTACT_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Absolute URL of the `/send-email` endpoint.
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// How long the "sent" acknowledgment stays visible; `None` keeps it until the next send.
    pub acknowledgment_ms: Option<u64>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            acknowledgment_ms: None,
            log_destination: LogDestination::default(),
            log_level: "warn".to_string(),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub log_destination: Option<LogDestination>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Loads `path`, or `contact_app.ron` from the working directory when `path` is `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {}", path.display()))
            }
        };

        Self::from_ron_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(destination) = overrides.log_destination {
            self.log_destination = destination;
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        parse_endpoint(&self.endpoint)
            .with_context(|| format!("endpoint `{}` must be an http(s) URL", self.endpoint))?;
        if self.request_timeout_ms == 0 {
            bail!("request_timeout_ms must be greater than zero");
        }
        if self.connect_timeout_ms == 0 {
            bail!("connect_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            endpoint: self.endpoint.trim().to_string(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn acknowledgment_duration(&self) -> Option<Duration> {
        self.acknowledgment_ms.map(Duration::from_millis)
    }
}
