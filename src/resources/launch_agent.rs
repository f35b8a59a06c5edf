//! macOS launch agent resource.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{Resource, ResourceChange, ResourceState};
use crate::config::launch_agents::LaunchAgentEntry;
use crate::error::ResourceError;
use crate::exec::Executor;

/// A per-user launch agent resource.
///
/// The desired state is an agent plist under `~/Library/LaunchAgents` plus a
/// loaded launchd job. Convergence writes the plist (XML) and reloads the
/// job with `launchctl`.
#[derive(Debug)]
pub struct LaunchAgentResource<'a> {
    /// Desired agent definition.
    pub entry: LaunchAgentEntry,
    /// Path of the agent plist on disk.
    pub plist_path: PathBuf,
    executor: &'a dyn Executor,
    launchctl: &'a str,
}

impl<'a> LaunchAgentResource<'a> {
    /// Create a new launch agent resource rooted at the user's home directory.
    #[must_use]
    pub fn new(
        entry: LaunchAgentEntry,
        home: &std::path::Path,
        executor: &'a dyn Executor,
        launchctl: &'a str,
    ) -> Self {
        let plist_path = home
            .join("Library")
            .join("LaunchAgents")
            .join(format!("{}.plist", entry.label));
        Self {
            entry,
            plist_path,
            executor,
            launchctl,
        }
    }

    /// The agent plist dictionary for the desired state.
    fn desired_plist(&self) -> plist::Value {
        let mut dict = plist::Dictionary::new();
        dict.insert(
            "Label".to_string(),
            plist::Value::String(self.entry.label.clone()),
        );
        dict.insert(
            "ProgramArguments".to_string(),
            plist::Value::Array(
                self.entry
                    .program_arguments
                    .iter()
                    .map(|arg| plist::Value::String(arg.clone()))
                    .collect(),
            ),
        );
        dict.insert(
            "RunAtLoad".to_string(),
            plist::Value::Boolean(self.entry.run_at_load),
        );
        if let Some(interval) = self.entry.start_interval {
            dict.insert(
                "StartInterval".to_string(),
                plist::Value::Integer(interval.into()),
            );
        }
        plist::Value::Dictionary(dict)
    }

    /// Whether launchd currently has the job loaded.
    fn is_loaded(&self) -> Result<bool> {
        let result = self
            .executor
            .run_unchecked(self.launchctl, &["list", &self.entry.label])?;
        Ok(result.success)
    }
}

impl Resource for LaunchAgentResource<'_> {
    fn description(&self) -> String {
        self.entry.label.clone()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.plist_path.exists() {
            return Ok(ResourceState::Missing);
        }

        let on_disk = plist::Value::from_file(&self.plist_path)
            .with_context(|| format!("reading {}", self.plist_path.display()))?;
        if on_disk != self.desired_plist() {
            return Ok(ResourceState::Incorrect {
                current: "agent file out of date".to_string(),
            });
        }

        if self.is_loaded()? {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: "not loaded".to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        if let Some(parent) = self.plist_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        // Unload a stale definition first; tolerated to fail when not loaded.
        let path = self.plist_path.to_string_lossy().to_string();
        let _ = self
            .executor
            .run_unchecked(self.launchctl, &["unload", "-w", &path])?;

        self.desired_plist()
            .to_file_xml(&self.plist_path)
            .with_context(|| format!("writing {}", self.plist_path.display()))?;

        self.executor
            .run(self.launchctl, &["load", "-w", &path])
            .map_err(|err| ResourceError::LaunchAgent {
                label: self.entry.label.clone(),
                reason: format!("load failed: {err:#}"),
            })?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !self.plist_path.exists() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let path = self.plist_path.to_string_lossy().to_string();
        let _ = self
            .executor
            .run_unchecked(self.launchctl, &["unload", "-w", &path])?;

        std::fs::remove_file(&self.plist_path)
            .with_context(|| format!("removing {}", self.plist_path.display()))?;
        Ok(ResourceChange::Applied)
    }
}
