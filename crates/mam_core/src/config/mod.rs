//! Process-wide bridge configuration.
//!
//! Loaded from a TOML file once at startup and immutable afterwards. The
//! registry publishes one REST base per database, with the port selecting
//! live versus test; both are resolved here so the rest of the process
//! never sees a placeholder URL.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::RegistryEndpoint;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Raw on-disk settings. `PORT` and `DATABASE` placeholders in the URL
/// templates are substituted at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub registry: RegistrySettings,

    #[serde(default)]
    pub probe: ProbeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: RegistrySettings::default(),
            probe: ProbeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Base URL template, e.g. `http://registryapp01:PORT/api/v1/database/DATABASE`.
    #[serde(default = "default_registry_base")]
    pub base_url: String,

    #[serde(default = "default_registry_port")]
    pub port: String,

    #[serde(default = "default_registry_database")]
    pub database: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Probe endpoint template, e.g. `http://10.0.20.96:PORT/api/probe`.
    #[serde(default = "default_probe_url")]
    pub url: String,

    #[serde(default = "default_probe_port")]
    pub port: String,
}

fn default_registry_base() -> String {
    "http://registryapp01:PORT/api/v1/database/DATABASE".to_string()
}

fn default_registry_port() -> String {
    "11000".to_string()
}

fn default_registry_database() -> String {
    "REI_LIVE".to_string()
}

fn default_probe_url() -> String {
    "http://10.0.20.96:PORT/api/probe".to_string()
}

fn default_probe_port() -> String {
    "80".to_string()
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: default_registry_base(),
            port: default_registry_port(),
            database: default_registry_database(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            url: default_probe_url(),
            port: default_probe_port(),
        }
    }
}

/// Resolved, immutable configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    base_url: String,
    probe_url: String,
    username: String,
    password: String,
}

impl RegistryConfig {
    /// Load settings from a TOML file and resolve the URL templates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&text)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(Self::from_settings(settings))
    }

    /// Resolve from in-memory settings (defaults when no file exists).
    pub fn from_settings(settings: Settings) -> Self {
        let base_url = settings
            .registry
            .base_url
            .replace("PORT", &settings.registry.port)
            .replace("DATABASE", &settings.registry.database);
        let probe_url = settings.probe.url.replace("PORT", &settings.probe.port);
        Self {
            base_url,
            probe_url,
            username: settings.registry.username,
            password: settings.registry.password,
        }
    }

    /// Full URL for a registry endpoint.
    pub fn endpoint_url(&self, endpoint: RegistryEndpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.table())
    }

    pub fn probe_url(&self) -> &str {
        &self.probe_url
    }

    pub fn credentials(&self) -> (&str, &str) {
        (&self.username, &self.password)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn placeholders_resolve_once_at_load() {
        let config = RegistryConfig::default();
        assert_eq!(
            config.endpoint_url(RegistryEndpoint::Asset),
            "http://registryapp01:11000/api/v1/database/REI_LIVE/LibMaster"
        );
        assert_eq!(config.probe_url(), "http://10.0.20.96:80/api/probe");
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[registry]\nport = \"11001\"\ndatabase = \"REI_TEST\"\nusername = \"svc_bridge\""
        )
        .unwrap();
        let config = RegistryConfig::load(file.path()).unwrap();
        assert_eq!(
            config.endpoint_url(RegistryEndpoint::WorkOrderQuery),
            "http://registryapp01:11001/api/v1/database/REI_TEST/JmWorkOrderList"
        );
        assert_eq!(config.credentials().0, "svc_bridge");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "registry = [not toml").unwrap();
        assert!(matches!(
            RegistryConfig::load(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
