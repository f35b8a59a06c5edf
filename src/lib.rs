//! System preferences management engine.
//!
//! Cross-platform tool for declarative system configuration: macOS property
//! list entries, Windows printers, and macOS launch agents — all driven by
//! TOML configuration files in `conf/` and converged by shelling out to the
//! platform's own tools (`PlistBuddy`, `defaults`, `plutil`, `launchctl`,
//! PowerShell).
//!
//! The public API is organised into five layers:
//!
//! - **[`config`]** — parse and validate TOML config files
//! - **[`plist`]** — plist command encoding and value decoding
//! - **[`resources`]** — idempotent `check + apply` primitives (plist entries, printers, …)
//! - **[`tasks`]** — named units of work wired to resources
//! - **[`commands`]** — top-level subcommand orchestration (`apply`, `remove`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod plist;
pub mod resources;
pub mod tasks;
