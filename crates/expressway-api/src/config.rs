use std::path::PathBuf;

use expressway_core::config::{LayeredConfig, CONFIG_FILE_NAME};
use expressway_core::error::Result;

/// API server configuration resolved from defaults, `expressway.toml` and
/// environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub cors_origin: String,
}

impl ApiConfig {
    /// Load configuration from the working directory and the environment
    pub fn load() -> Result<Self> {
        let layered = LayeredConfig::with_defaults()
            .load_from_optional_file(CONFIG_FILE_NAME)?
            .load_from_env();
        Ok(Self::from_layered(&layered))
    }

    pub fn from_layered(config: &LayeredConfig) -> Self {
        Self {
            port: config.port.value,
            data_file: config.data_file.value.clone(),
            static_dir: config.static_dir.value.clone(),
            cors_origin: config.cors_origin.value.clone(),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
