//! External tool path configuration.
//!
//! Every executable the engine shells out to is an injected configuration
//! value rather than a hardcoded literal at call sites, so tests and
//! alternate install locations can substitute their own paths.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// Resolved paths to the external tools the engine invokes.
#[derive(Debug, Clone)]
pub struct Tools {
    /// `PlistBuddy` executable.
    pub plistbuddy: String,
    /// `defaults` executable.
    pub defaults: String,
    /// `plutil` executable.
    pub plutil: String,
    /// `launchctl` executable.
    pub launchctl: String,
    /// PowerShell executable (`pwsh` when found on PATH).
    pub powershell: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            plistbuddy: "/usr/libexec/PlistBuddy".to_string(),
            defaults: "/usr/bin/defaults".to_string(),
            plutil: "/usr/bin/plutil".to_string(),
            launchctl: "/bin/launchctl".to_string(),
            powershell: default_powershell(),
        }
    }
}

/// Optional overrides as they appear in tools.toml.
#[derive(Debug, Default, Deserialize)]
struct ToolsFile {
    plistbuddy: Option<String>,
    defaults: Option<String>,
    plutil: Option<String>,
    launchctl: Option<String>,
    powershell: Option<String>,
}

/// Prefer PowerShell Core when it is on PATH.
fn default_powershell() -> String {
    if which::which("pwsh").is_ok() {
        "pwsh".to_string()
    } else {
        "powershell".to_string()
    }
}

/// Load tool paths from tools.toml, falling back to the standard install
/// locations for anything not overridden.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<Tools> {
    let overrides: ToolsFile = toml_loader::load_config(path)?;
    let defaults = Tools::default();

    Ok(Tools {
        plistbuddy: overrides.plistbuddy.unwrap_or(defaults.plistbuddy),
        defaults: overrides.defaults.unwrap_or(defaults.defaults),
        plutil: overrides.plutil.unwrap_or(defaults.plutil),
        launchctl: overrides.launchctl.unwrap_or(defaults.launchctl),
        powershell: overrides.powershell.unwrap_or(defaults.powershell),
    })
}
