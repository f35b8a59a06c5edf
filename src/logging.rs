//! Structured logging with dry-run awareness and summary collection.
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task was skipped because it does not apply to the current platform.
    NotApplicable,
    /// Task was explicitly skipped (e.g., tool not found, config empty).
    Skipped,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task encountered an error and could not complete.
    Failed,
}

impl TaskStatus {
    fn label(self) -> &'static str {
        match self {
            TaskStatus::Ok => "ok",
            TaskStatus::NotApplicable => "n/a",
            TaskStatus::Skipped => "skipped",
            TaskStatus::DryRun => "dry run",
            TaskStatus::Failed => "FAILED",
        }
    }
}

/// Abstraction over logging backends.
///
/// Task code logs through this trait so tests can substitute a collector
/// without touching the global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

/// Install the global tracing subscriber.
///
/// Console verbosity defaults to `info` and is raised to `debug` with the
/// `--verbose` flag; `RUST_LOG` overrides both.
pub fn init_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Structured logger with dry-run awareness and summary collection.
#[derive(Debug)]
pub struct Logger {
    verbose: bool,
    tasks: Mutex<Vec<TaskEntry>>,
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Whether verbose output is enabled.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Return a clone of all recorded task entries.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    /// Whether any recorded task failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.task_entries()
            .iter()
            .any(|entry| entry.status == TaskStatus::Failed)
    }

    /// Log the run summary: one line per recorded task, then totals.
    pub fn print_summary(&self) {
        let entries = self.task_entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");
        let mut failed = 0u32;
        for entry in &entries {
            if entry.status == TaskStatus::Failed {
                failed += 1;
            }
            match &entry.message {
                Some(message) => {
                    self.info(&format!("{:<9} {} ({message})", entry.status.label(), entry.name));
                }
                None => self.info(&format!("{:<9} {}", entry.status.label(), entry.name)),
            }
        }
        if failed > 0 {
            self.error(&format!("{failed} of {} tasks failed", entries.len()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!("==> {msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!("[dry run] {msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(ToString::to_string),
            });
        }
    }
}
