//! Top-level subcommand orchestration.
pub mod apply;
pub mod check;
pub mod remove;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates platform detection, root resolution, and configuration
/// loading so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform information.
    pub platform: Platform,
    /// Loaded configuration.
    pub config: Config,
}

impl CommandSetup {
    /// Detect the platform, resolve the root, and load all configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined or any
    /// configuration file fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let platform = Platform::detect();
        let root = resolve_root(global)?;

        let version = option_env!("SYSPREFS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        log.info(&format!("sysprefs {version}"));

        log.stage("Loading configuration");
        let config = Config::load(&root, &platform)?;
        log.debug(&format!("{} plist entries", config.plists.len()));
        log.debug(&format!("{} printers", config.printers.len()));
        log.debug(&format!("{} launch agents", config.launch_agents.len()));
        log.info(&format!(
            "loaded {} resources from {}",
            config.plists.len() + config.printers.len() + config.launch_agents.len(),
            root.display()
        ));

        Ok(Self { platform, config })
    }
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("one or more tasks failed");
    }
    Ok(())
}

/// Resolve the configuration root directory.
///
/// Precedence: the `--root` flag, the `SYSPREFS_ROOT` environment variable,
/// then the current directory when it contains a `conf/` directory.
///
/// # Errors
///
/// Returns an error if no candidate resolves to a config root.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(dunce::canonicalize(root).unwrap_or_else(|_| root.clone()));
    }

    if let Ok(root) = std::env::var("SYSPREFS_ROOT") {
        return Ok(PathBuf::from(root));
    }

    let cwd = std::env::current_dir()?;
    if cwd.join("conf").exists() {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine config root. Use --root or set SYSPREFS_ROOT env var");
}

/// Print version information to stdout.
#[allow(clippy::print_stdout)]
pub fn print_version() {
    let version = option_env!("SYSPREFS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("sysprefs {version}");
}
