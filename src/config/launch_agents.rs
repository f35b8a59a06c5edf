//! macOS launch agent configuration loading.
use anyhow::{Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::toml_loader;

/// A desired per-user launch agent.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchAgentEntry {
    /// Reverse-DNS agent label (e.g., "com.example.cleanup").
    pub label: String,
    /// Program and arguments, `ProgramArguments` in the agent plist.
    pub program_arguments: Vec<String>,
    /// Whether launchd starts the job as soon as it is loaded.
    #[serde(default)]
    pub run_at_load: bool,
    /// Seconds between launches, `StartInterval` in the agent plist.
    #[serde(default)]
    pub start_interval: Option<i64>,
}

/// Load launch agents from launch-agents.toml. One top-level section per agent.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or an agent has no program
/// arguments.
pub fn load(path: &Path) -> Result<Vec<LaunchAgentEntry>> {
    let config: HashMap<String, LaunchAgentEntry> = toml_loader::load_config(path)?;

    let mut agents: Vec<LaunchAgentEntry> = config.into_values().collect();
    agents.sort_by(|a, b| a.label.cmp(&b.label));

    for agent in &agents {
        if agent.program_arguments.is_empty() {
            bail!("launch agent '{}' has empty program_arguments", agent.label);
        }
    }
    Ok(agents)
}
