//! Shared context for task execution.
use anyhow::Result;

use crate::config::Config;
use crate::error::PlatformError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

/// Shared context for task execution.
pub struct Context<'a> {
    /// Configuration loaded from TOML files.
    pub config: &'a Config,
    /// Detected platform information.
    pub platform: &'a Platform,
    /// Logger for output and task recording.
    pub log: &'a dyn Log,
    /// Whether to preview changes without applying.
    pub dry_run: bool,
    /// User's home directory path.
    pub home: std::path::PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: &'a dyn Executor,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl<'a> Context<'a> {
    /// Creates a new context for task execution.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME (or USERPROFILE on Windows) environment
    /// variable is not set.
    pub fn new(
        config: &'a Config,
        platform: &'a Platform,
        log: &'a dyn Log,
        dry_run: bool,
        executor: &'a dyn Executor,
    ) -> Result<Self> {
        let home = if cfg!(target_os = "windows") {
            std::env::var("USERPROFILE")
                .or_else(|_| std::env::var("HOME"))
                .map_err(|_| {
                    PlatformError::NoHome(
                        "neither USERPROFILE nor HOME environment variable is set".to_string(),
                    )
                })?
        } else {
            std::env::var("HOME").map_err(|_| {
                PlatformError::NoHome("HOME environment variable is not set".to_string())
            })?
        };

        Ok(Self {
            config,
            platform,
            log,
            dry_run,
            home: std::path::PathBuf::from(home),
            executor,
        })
    }
}
