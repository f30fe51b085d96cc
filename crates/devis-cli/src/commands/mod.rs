//! Subcommands and the loading helpers they share.

pub mod batch;
pub mod config;
pub mod draft;
pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use devis_core::models::client::Client;
use devis_core::models::config::DevisConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devis")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DevisConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(DevisConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(DevisConfig::from_file(&default_path)?)
    } else {
        Ok(DevisConfig::default())
    }
}

/// Load a client roster from a JSON array file. No file means an empty roster.
pub fn load_clients(path: Option<&Path>) -> anyhow::Result<Vec<Client>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    if !path.exists() {
        anyhow::bail!("Client file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)?;
    let clients: Vec<Client> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid client file {}: {}", path.display(), e))?;

    debug!("Loaded {} clients from {}", clients.len(), path.display());
    Ok(clients)
}
