use crate::error::{ExpresswayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the configuration file
pub const CONFIG_FILE_NAME: &str = "expressway.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration shared by the server and the CLI
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub port: ConfigValue<u16>,
    pub data_file: ConfigValue<PathBuf>,
    pub static_dir: ConfigValue<PathBuf>,
    pub cors_origin: ConfigValue<String>,
    pub server_url: ConfigValue<String>,
    pub provinces_url: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            port: ConfigValue::new(3000, ConfigSource::Default),
            data_file: ConfigValue::new(
                PathBuf::from("public/vietnam_express_way.geojson"),
                ConfigSource::Default,
            ),
            static_dir: ConfigValue::new(PathBuf::from("public"), ConfigSource::Default),
            cors_origin: ConfigValue::new(
                "http://localhost:3000".to_string(),
                ConfigSource::Default,
            ),
            server_url: ConfigValue::new(
                "http://localhost:3000".to_string(),
                ConfigSource::Default,
            ),
            provinces_url: ConfigValue::new(
                "https://hoanglongcao.github.io/bib/mekong%20delta%20database/vietnam_provinces.geojson"
                    .to_string(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ExpresswayError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ExpresswayError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }

        if let Some(data_file) = file_config.data_file {
            self.data_file.update(data_file, ConfigSource::File);
        }

        if let Some(static_dir) = file_config.static_dir {
            self.static_dir.update(static_dir, ConfigSource::File);
        }

        if let Some(cors_origin) = file_config.cors_origin {
            self.cors_origin.update(cors_origin, ConfigSource::File);
        }

        if let Some(server_url) = file_config.server_url {
            self.server_url.update(server_url, ConfigSource::File);
        }

        if let Some(provinces_url) = file_config.provinces_url {
            self.provinces_url.update(provinces_url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the config file only if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // EXPRESSWAY_PORT, with the conventional PORT as a fallback
        let port_var = env::var("EXPRESSWAY_PORT").or_else(|_| env::var("PORT"));
        if let Ok(port_str) = port_var {
            match parse_port(&port_str) {
                Ok(port) => self.port.update(port, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid port value '{}': expected an integer between 1 and 65535",
                    port_str
                ),
            }
        }

        if let Ok(data_file) = env::var("EXPRESSWAY_DATA_FILE") {
            self.data_file.update(PathBuf::from(data_file), ConfigSource::Environment);
        }

        if let Ok(static_dir) = env::var("EXPRESSWAY_STATIC_DIR") {
            self.static_dir.update(PathBuf::from(static_dir), ConfigSource::Environment);
        }

        if let Ok(cors_origin) = env::var("EXPRESSWAY_CORS_ORIGIN") {
            self.cors_origin.update(cors_origin, ConfigSource::Environment);
        }

        if let Ok(server_url) = env::var("EXPRESSWAY_SERVER_URL") {
            self.server_url.update(server_url, ConfigSource::Environment);
        }

        if let Ok(provinces_url) = env::var("EXPRESSWAY_PROVINCES_URL") {
            self.provinces_url.update(provinces_url, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_file) = overrides.data_file {
            self.data_file.update(data_file, ConfigSource::Cli);
        }

        if let Some(server_url) = overrides.server_url {
            self.server_url.update(server_url, ConfigSource::Cli);
        }

        if let Some(provinces_url) = overrides.provinces_url {
            self.provinces_url.update(provinces_url, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("port".to_string(), (self.port.value.to_string(), self.port.source));
        map.insert(
            "data_file".to_string(),
            (self.data_file.value.display().to_string(), self.data_file.source),
        );
        map.insert(
            "static_dir".to_string(),
            (self.static_dir.value.display().to_string(), self.static_dir.source),
        );
        map.insert(
            "cors_origin".to_string(),
            (self.cors_origin.value.clone(), self.cors_origin.source),
        );
        map.insert(
            "server_url".to_string(),
            (self.server_url.value.clone(), self.server_url.source),
        );
        map.insert(
            "provinces_url".to_string(),
            (self.provinces_url.value.clone(), self.provinces_url.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    port: Option<u16>,
    data_file: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    cors_origin: Option<String>,
    server_url: Option<String>,
    provinces_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub server_url: Option<String>,
    pub provinces_url: Option<String>,
}

/// Parse a TCP port, rejecting 0
pub fn parse_port(s: &str) -> Result<u16> {
    match s.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ExpresswayError::ConfigInvalid {
            key: "port".to_string(),
            reason: format!("Invalid port: {}. Use an integer between 1 and 65535", s),
        }),
    }
}
