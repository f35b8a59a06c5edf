//! Remove command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, RemoveOpts};
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Run the remove command: undo a previous apply.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any task records a
/// failure.
pub fn run(global: &GlobalOpts, _opts: &RemoveOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let executor = SystemExecutor;
    let ctx = Context::new(&setup.config, &setup.platform, log, global.dry_run, &executor)?;

    let tasks = tasks::all_remove_tasks();
    super::run_tasks_to_completion(tasks.iter().map(Box::as_ref), &ctx, log)
}
