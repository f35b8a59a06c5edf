// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed config repository and a recording
// executor double so each integration test can set up an isolated
// environment without repeating boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use sysprefs_cli::exec::{ExecResult, Executor};

/// Write the minimal set of TOML config files required by the engine into
/// `root/conf`.
///
/// All files are empty, which the loader treats as "nothing configured".
pub fn setup_minimal_repo(root: &Path) {
    let conf = root.join("conf");
    std::fs::create_dir_all(&conf).expect("create conf dir");

    for file in &[
        "plists.toml",
        "printers.toml",
        "launch-agents.toml",
        "tools.toml",
    ] {
        std::fs::write(conf.join(file), "").expect("write config file");
    }
}

/// An isolated config repository backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
#[derive(Debug)]
pub struct IntegrationTestContext {
    /// Temporary directory containing the test config repository.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with a minimal but valid repository structure.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        setup_minimal_repo(root.path());
        Self { root }
    }

    /// Path to the repository root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Overwrite one config file under `conf/`.
    pub fn write_conf(&self, name: &str, content: &str) {
        std::fs::write(self.root_path().join("conf").join(name), content)
            .expect("write config file");
    }
}

/// An [`Executor`] double that records every invocation.
///
/// Responses are `(success, stdout)` pairs consumed in FIFO order; once the
/// queue is empty every call fails. Checked variants return an error for a
/// failed response, unchecked variants report it through `success`.
#[derive(Debug)]
pub struct SpyExecutor {
    responses: Mutex<VecDeque<(bool, String)>>,
    calls: Mutex<Vec<String>>,
    which_result: bool,
}

impl SpyExecutor {
    /// Create a spy from an ordered list of `(success, stdout)` pairs.
    pub fn new(responses: Vec<(bool, String)>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            which_result: true,
        }
    }

    /// Set the value returned by every [`Executor::which`] call.
    #[must_use]
    pub fn with_which(mut self, result: bool) -> Self {
        self.which_result = result;
        self
    }

    /// Return every recorded invocation, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn record(&self, call: String) -> (bool, String) {
        self.calls.lock().expect("calls mutex").push(call);
        self.responses
            .lock()
            .expect("responses mutex")
            .pop_front()
            .unwrap_or((false, "unexpected call".to_string()))
    }

    fn checked(&self, call: String) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.record(call);
        if success {
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success: true,
                code: Some(0),
            })
        } else {
            anyhow::bail!("spy command failed")
        }
    }

    fn unchecked(&self, call: String) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.record(call);
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(i32::from(!success)),
        })
    }
}

impl Executor for SpyExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.checked(format!("{program} {}", args.join(" ")))
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.unchecked(format!("{program} {}", args.join(" ")))
    }

    fn run_shell(&self, command: &str) -> anyhow::Result<ExecResult> {
        self.checked(command.to_string())
    }

    fn run_shell_unchecked(&self, command: &str) -> anyhow::Result<ExecResult> {
        self.unchecked(command.to_string())
    }

    fn which(&self, _: &str) -> bool {
        self.which_result
    }
}
