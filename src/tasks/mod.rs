//! Named tasks that orchestrate resource changes.
pub mod context;
pub mod launch_agents;
pub mod plists;
pub mod printers;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task should run on the current platform.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails, such as when a platform command
    /// exits non-zero.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Result of a single task execution.
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (nothing configured, tool unavailable).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for tasks that process many resources.
///
/// Provides consistent summary logging across all tasks.
///
/// # Examples
///
/// ```
/// use sysprefs_cli::tasks::TaskStats;
///
/// let mut stats = TaskStats::new();
/// stats.changed = 3;
/// stats.already_ok = 10;
///
/// assert_eq!(stats.summary(false), "3 changed, 10 already ok");
/// assert_eq!(stats.summary(true), "3 would change, 10 already ok");
/// ```
#[derive(Debug, Default)]
pub struct TaskStats {
    /// Number of resources changed or applied.
    pub changed: u32,
    /// Number of resources already in the correct state.
    pub already_ok: u32,
    /// Number of resources skipped due to errors or inapplicability.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return the appropriate [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
    }
}

/// Every apply task, in execution order.
#[must_use]
pub fn all_apply_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(plists::ApplyPlists),
        Box::new(launch_agents::ApplyLaunchAgents),
        Box::new(printers::ApplyPrinters),
    ]
}

/// Every remove task, undoing apply in reverse order.
#[must_use]
pub fn all_remove_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(printers::RemovePrinters),
        Box::new(launch_agents::RemoveLaunchAgents),
        Box::new(plists::RemovePlists),
    ]
}

/// Execute a task, recording its outcome on the context's logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());
    match task.run(ctx) {
        Ok(TaskResult::Ok) => ctx.log.record_task(task.name(), TaskStatus::Ok, None),
        Ok(TaskResult::DryRun) => ctx.log.record_task(task.name(), TaskStatus::DryRun, None),
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Err(err) => {
            ctx.log.error(&format!("{}: {err:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{err:#}")));
        }
    }
}

/// Converge each resource: check state, apply when it differs.
///
/// # Errors
///
/// Propagates the first state-check or apply failure.
pub fn process_resources(ctx: &Context, resources: &[&dyn Resource]) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for resource in resources {
        match resource.current_state()? {
            ResourceState::Correct => {
                ctx.log.debug(&format!("ok: {}", resource.description()));
                stats.already_ok += 1;
            }
            ResourceState::Invalid { reason } => {
                ctx.log
                    .warn(&format!("skipping {}: {reason}", resource.description()));
                stats.skipped += 1;
            }
            ResourceState::Missing | ResourceState::Incorrect { .. } => {
                if ctx.dry_run {
                    ctx.log.dry_run(&format!("apply {}", resource.description()));
                    stats.changed += 1;
                } else {
                    match resource.apply()? {
                        ResourceChange::Applied => {
                            ctx.log.info(&format!("applied {}", resource.description()));
                            stats.changed += 1;
                        }
                        ResourceChange::AlreadyCorrect => stats.already_ok += 1,
                        ResourceChange::Skipped { reason } => {
                            ctx.log
                                .warn(&format!("skipping {}: {reason}", resource.description()));
                            stats.skipped += 1;
                        }
                    }
                }
            }
        }
    }
    Ok(stats)
}

/// Remove each resource that is currently present.
///
/// # Errors
///
/// Propagates the first state-check or remove failure.
pub fn process_resources_remove(ctx: &Context, resources: &[&dyn Resource]) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for resource in resources {
        match resource.current_state()? {
            ResourceState::Missing => stats.already_ok += 1,
            ResourceState::Invalid { reason } => {
                ctx.log
                    .warn(&format!("skipping {}: {reason}", resource.description()));
                stats.skipped += 1;
            }
            ResourceState::Correct | ResourceState::Incorrect { .. } => {
                if ctx.dry_run {
                    ctx.log
                        .dry_run(&format!("remove {}", resource.description()));
                    stats.changed += 1;
                } else {
                    match resource.remove()? {
                        ResourceChange::Applied => {
                            ctx.log.info(&format!("removed {}", resource.description()));
                            stats.changed += 1;
                        }
                        ResourceChange::AlreadyCorrect => stats.already_ok += 1,
                        ResourceChange::Skipped { reason } => {
                            ctx.log
                                .warn(&format!("skipping {}: {reason}", resource.description()));
                            stats.skipped += 1;
                        }
                    }
                }
            }
        }
    }
    Ok(stats)
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn stats_summary_without_skips() {
        let stats = TaskStats {
            changed: 5,
            already_ok: 12,
            skipped: 0,
        };
        assert_eq!(stats.summary(false), "5 changed, 12 already ok");
        assert_eq!(stats.summary(true), "5 would change, 12 already ok");
    }

    #[test]
    fn stats_summary_with_skips() {
        let stats = TaskStats {
            changed: 1,
            already_ok: 2,
            skipped: 3,
        };
        assert_eq!(stats.summary(false), "1 changed, 2 already ok, 3 skipped");
    }

    #[test]
    fn stats_add_assign() {
        let mut total = TaskStats {
            changed: 1,
            already_ok: 1,
            skipped: 0,
        };
        total += TaskStats {
            changed: 2,
            already_ok: 0,
            skipped: 1,
        };
        assert_eq!(total.changed, 3);
        assert_eq!(total.already_ok, 1);
        assert_eq!(total.skipped, 1);
    }

    use crate::config::{Config, tools::Tools};
    use crate::platform::{Os, Platform};
    use crate::resources::test_helpers::MockExecutor;
    use test_log::TestLog;

    fn empty_config() -> Config {
        Config {
            root: std::path::PathBuf::from("/tmp"),
            plists: Vec::new(),
            printers: Vec::new(),
            launch_agents: Vec::new(),
            tools: Tools::default(),
        }
    }

    struct StubTask {
        applicable: bool,
        result: fn() -> Result<TaskResult>,
    }

    impl Task for StubTask {
        fn name(&self) -> &str {
            "Stub"
        }

        fn should_run(&self, _: &Context) -> bool {
            self.applicable
        }

        fn run(&self, _: &Context) -> Result<TaskResult> {
            (self.result)()
        }
    }

    fn run_stub(task: &StubTask) -> TestLog {
        let config = empty_config();
        let platform = Platform::new(Os::Linux);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![]);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: false,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };
        execute(task, &ctx);
        log
    }

    #[test]
    fn execute_records_not_applicable() {
        let log = run_stub(&StubTask {
            applicable: false,
            result: || Ok(TaskResult::Ok),
        });
        assert_eq!(
            log.tasks(),
            vec![("Stub".to_string(), TaskStatus::NotApplicable)]
        );
    }

    #[test]
    fn execute_records_success() {
        let log = run_stub(&StubTask {
            applicable: true,
            result: || Ok(TaskResult::Ok),
        });
        assert_eq!(log.tasks(), vec![("Stub".to_string(), TaskStatus::Ok)]);
    }

    #[test]
    fn execute_records_failure_without_propagating() {
        let log = run_stub(&StubTask {
            applicable: true,
            result: || anyhow::bail!("boom"),
        });
        assert_eq!(log.tasks(), vec![("Stub".to_string(), TaskStatus::Failed)]);
        assert!(
            log.messages().iter().any(|m| m.contains("boom")),
            "error message is logged: {:?}",
            log.messages()
        );
    }

    struct StubResource {
        state: ResourceState,
    }

    impl Resource for StubResource {
        fn description(&self) -> String {
            "stub resource".to_string()
        }

        fn current_state(&self) -> Result<ResourceState> {
            Ok(self.state.clone())
        }

        fn apply(&self) -> Result<ResourceChange> {
            Ok(ResourceChange::Applied)
        }

        fn remove(&self) -> Result<ResourceChange> {
            Ok(ResourceChange::Applied)
        }
    }

    #[test]
    fn process_resources_counts_states() {
        let config = empty_config();
        let platform = Platform::new(Os::Linux);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![]);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: false,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };

        let correct = StubResource {
            state: ResourceState::Correct,
        };
        let missing = StubResource {
            state: ResourceState::Missing,
        };
        let invalid = StubResource {
            state: ResourceState::Invalid {
                reason: "nope".to_string(),
            },
        };
        let refs: Vec<&dyn Resource> = vec![&correct, &missing, &invalid];
        let stats = process_resources(&ctx, &refs).unwrap();
        assert_eq!(stats.changed, 1);
        assert_eq!(stats.already_ok, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn process_resources_remove_skips_missing() {
        let config = empty_config();
        let platform = Platform::new(Os::Linux);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![]);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: false,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };

        let present = StubResource {
            state: ResourceState::Correct,
        };
        let missing = StubResource {
            state: ResourceState::Missing,
        };
        let refs: Vec<&dyn Resource> = vec![&present, &missing];
        let stats = process_resources_remove(&ctx, &refs).unwrap();
        assert_eq!(stats.changed, 1);
        assert_eq!(stats.already_ok, 1);
    }
}
