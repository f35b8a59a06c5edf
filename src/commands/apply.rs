//! Apply command implementation.
use anyhow::Result;

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

/// Run the apply command: converge every configured resource.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any task records a
/// failure.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let executor = SystemExecutor;
    let ctx = Context::new(&setup.config, &setup.platform, log, global.dry_run, &executor)?;

    let all_tasks = tasks::all_apply_tasks();
    let tasks_to_run = filter_tasks(&all_tasks, &opts.skip, &opts.only);

    super::run_tasks_to_completion(tasks_to_run, &ctx, log)
}

/// Filter the task list by the `--skip` and `--only` name fragments.
///
/// `--only` wins over `--skip`; both match case-insensitively on task name
/// substrings.
fn filter_tasks<'a>(
    all_tasks: &'a [Box<dyn Task>],
    skip: &[String],
    only: &[String],
) -> Vec<&'a dyn Task> {
    all_tasks
        .iter()
        .filter(|task| {
            let name = task.name().to_lowercase();
            if !only.is_empty() {
                return only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !skip.is_empty() {
                return !skip.iter().any(|s| name.contains(&s.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect()
}
