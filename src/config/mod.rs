//! TOML configuration loading, filtered by platform.
pub mod launch_agents;
pub mod plists;
pub mod printers;
pub mod toml_loader;
pub mod tools;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// All loaded configuration for the current platform.
#[derive(Debug)]
pub struct Config {
    /// Configuration root directory.
    pub root: PathBuf,
    /// Desired plist entries (macOS only; empty elsewhere).
    pub plists: Vec<plists::PlistEntry>,
    /// Desired printers (Windows only; empty elsewhere).
    pub printers: Vec<printers::PrinterEntry>,
    /// Desired launch agents (macOS only; empty elsewhere).
    pub launch_agents: Vec<launch_agents::LaunchAgentEntry>,
    /// Resolved external tool paths.
    pub tools: tools::Tools,
}

impl Config {
    /// Load all configuration from the conf/ directory under `root`.
    ///
    /// Resource kinds that cannot apply to the detected platform are not
    /// loaded at all, so a macOS-only repo parses cleanly on Windows and
    /// vice versa.
    ///
    /// # Errors
    ///
    /// Returns an error if any present config file fails to parse or
    /// validate.
    pub fn load(root: &Path, platform: &Platform) -> Result<Self> {
        let conf = root.join("conf");

        let plists = if platform.is_macos() {
            plists::load(&conf.join("plists.toml")).context("loading plists.toml")?
        } else {
            Vec::new()
        };

        let printers = if platform.is_windows() {
            printers::load(&conf.join("printers.toml")).context("loading printers.toml")?
        } else {
            Vec::new()
        };

        let launch_agents = if platform.is_macos() {
            launch_agents::load(&conf.join("launch-agents.toml"))
                .context("loading launch-agents.toml")?
        } else {
            Vec::new()
        };

        let tools = tools::load(&conf.join("tools.toml")).context("loading tools.toml")?;

        Ok(Self {
            root: root.to_path_buf(),
            plists,
            printers,
            launch_agents,
            tools,
        })
    }
}
