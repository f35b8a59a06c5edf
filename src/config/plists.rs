//! macOS plist entry configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;
use crate::plist::PlistValue;

/// A desired plist entry.
#[derive(Debug, Clone)]
pub struct PlistEntry {
    /// Path to the plist file.
    pub file: String,
    /// Entry path within the plist (may contain nested `:` segments).
    pub entry: String,
    /// Desired typed value.
    pub value: PlistValue,
    /// `plutil -convert` format, when an encoding was configured.
    pub format: Option<&'static str>,
}

/// TOML plist section with a target file and its desired values.
#[derive(Debug, Deserialize)]
struct PlistSection {
    file: String,
    encoding: Option<String>,
    values: BTreeMap<String, toml::Value>,
}

/// Map a configured plist encoding to its `plutil -convert` format.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownEncoding`] for anything outside the
/// recognised set; this is fatal at load time.
pub fn plutil_format(encoding: &str) -> Result<&'static str, ConfigError> {
    match encoding {
        "us-ascii" | "text/xml" | "utf-8" => Ok("xml1"),
        "binary" => Ok("binary1"),
        other => Err(ConfigError::UnknownEncoding(other.to_string())),
    }
}

/// Load plist entries from plists.toml.
///
/// Each top-level section names a target `file`, an optional `encoding`, and
/// a `values` table. Nested TOML tables become dictionary values; TOML
/// datetimes are rejected as unsupported.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed, an encoding is
/// unrecognised, or a value has no plist representation.
pub fn load(path: &Path) -> Result<Vec<PlistEntry>> {
    let config: HashMap<String, PlistSection> = toml_loader::load_config(path)?;

    let mut sections: Vec<(String, PlistSection)> = config.into_iter().collect();
    sections.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut entries = Vec::new();
    for (_, section) in sections {
        let format = section
            .encoding
            .as_deref()
            .map(plutil_format)
            .transpose()?;
        for (entry, raw) in &section.values {
            entries.push(PlistEntry {
                file: section.file.clone(),
                entry: entry.clone(),
                value: PlistValue::try_from(raw)?,
                format,
            });
        }
    }

    Ok(entries)
}
