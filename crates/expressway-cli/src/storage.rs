use anyhow::{bail, Result};
use expressway_core::config::LayeredConfig;
use expressway_core::ports::FeatureStore;
use expressway_editor::HttpFeatureClient;
use expressway_store::FileFeatureStore;
use std::sync::Arc;

/// Where features are read from and saved to
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// Rewrite the data file in place
    File,
    /// Submit to a running server
    Server,
}

impl Backend {
    pub fn from_flag(server: &Option<Option<String>>) -> Self {
        match server {
            Some(_) => Backend::Server,
            None => Backend::File,
        }
    }
}

pub fn open_store(backend: &Backend, config: &LayeredConfig) -> Result<Arc<dyn FeatureStore>> {
    match backend {
        Backend::File => {
            let path = &config.data_file.value;
            if !path.exists() {
                bail!(
                    "Data file not found: {}\n\n\
                    Remediation:\n  \
                      1. Run from the project root, or\n  \
                      2. Pass --data-file <PATH> or set EXPRESSWAY_DATA_FILE, or\n  \
                      3. Use --server to go through a running server",
                    path.display()
                );
            }
            tracing::debug!(path = %path.display(), "Using data file");
            Ok(Arc::new(FileFeatureStore::new(path)))
        }
        Backend::Server => {
            let url = &config.server_url.value;
            tracing::debug!(%url, "Using expressway server");
            Ok(Arc::new(HttpFeatureClient::new(url.clone())))
        }
    }
}
