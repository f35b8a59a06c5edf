//! Windows printer configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::toml_loader;

/// A desired printer.
#[derive(Debug, Clone, Deserialize)]
pub struct PrinterEntry {
    /// Printer device name (e.g., "Office Laser").
    pub name: String,
    /// Installed driver name.
    pub driver: String,
    /// Port name; defaults to `IP_<address>` when an address is given.
    #[serde(default)]
    pub port: Option<String>,
    /// IPv4 address of a network printer; a TCP/IP port is created for it.
    #[serde(default)]
    pub ipv4_address: Option<String>,
    /// Whether the printer is shared.
    #[serde(default)]
    pub shared: bool,
    /// Free-form comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Physical location description.
    #[serde(default)]
    pub location: Option<String>,
}

impl PrinterEntry {
    /// The port name to use, deriving `IP_<address>` when unset.
    #[must_use]
    pub fn port_name(&self) -> Option<String> {
        self.port.clone().or_else(|| {
            self.ipv4_address
                .as_ref()
                .map(|address| format!("IP_{address}"))
        })
    }
}

/// Load printers from printers.toml. One top-level section per printer.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<Vec<PrinterEntry>> {
    let config: HashMap<String, PrinterEntry> = toml_loader::load_config(path)?;

    let mut printers: Vec<PrinterEntry> = config.into_values().collect();
    printers.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(printers)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn load_printer_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printers.toml");
        std::fs::write(
            &path,
            "[office]\nname = \"Office Laser\"\ndriver = \"HP LaserJet 4000 Series PS\"\nipv4_address = \"10.0.0.12\"\nshared = true\n",
        )
        .unwrap();

        let printers = load(&path).unwrap();
        assert_eq!(printers.len(), 1);
        assert_eq!(printers[0].name, "Office Laser");
        assert_eq!(printers[0].driver, "HP LaserJet 4000 Series PS");
        assert!(printers[0].shared);
        assert_eq!(printers[0].port_name().as_deref(), Some("IP_10.0.0.12"));
    }

    #[test]
    fn explicit_port_wins_over_derived() {
        let entry = PrinterEntry {
            name: "P".into(),
            driver: "D".into(),
            port: Some("CustomPort".into()),
            ipv4_address: Some("10.0.0.9".into()),
            shared: false,
            comment: None,
            location: None,
        };
        assert_eq!(entry.port_name().as_deref(), Some("CustomPort"));
    }

    #[test]
    fn local_printer_has_no_port() {
        let entry = PrinterEntry {
            name: "P".into(),
            driver: "D".into(),
            port: None,
            ipv4_address: None,
            shared: false,
            comment: None,
            location: None,
        };
        assert!(entry.port_name().is_none());
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let printers = load(&dir.path().join("nope.toml")).unwrap();
        assert!(printers.is_empty());
    }
}
