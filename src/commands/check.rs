//! Check command implementation.
use anyhow::Result;

use crate::cli::{CheckOpts, GlobalOpts};
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Run the check command: report the state of every configured resource.
///
/// This is the apply task list executed with dry-run forced on, so resources
/// that are out of state are reported but nothing is changed.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any state check
/// records a failure.
pub fn run(global: &GlobalOpts, _opts: &CheckOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let executor = SystemExecutor;
    let ctx = Context::new(&setup.config, &setup.platform, log, true, &executor)?;

    let tasks = tasks::all_apply_tasks();
    super::run_tasks_to_completion(tasks.iter().map(Box::as_ref), &ctx, log)
}
