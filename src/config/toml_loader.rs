//! TOML configuration file parsing.
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load a TOML config file, treating a missing file as empty.
///
/// Generic loader that deserializes a TOML file whose sections are top-level
/// keys. Each resource config module layers its own section shape on top.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read and
/// [`ConfigError::InvalidSyntax`] if it cannot be parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        // Return empty config for missing files by deserializing empty TOML
        return toml::from_str("").context("Failed to create empty config");
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(toml::from_str(&content).map_err(|err| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: err.to_string(),
    })?)
}
