//! Domain-specific error types for the preferences engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`PlistError`](crate::plist::PlistError)) while command handlers at the
//! CLI boundary convert them to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SysprefsError
//! ├── Config(ConfigError)     — TOML parsing, encoding validation
//! ├── Resource(ResourceError) — plist entries, printers, launch agents
//! └── Platform(PlatformError) — OS-specific operation failures
//! ```

use thiserror::Error;

use crate::plist::PlistError;

/// Top-level error type for the preferences engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum SysprefsError {
    /// Configuration-related error (parsing, encoding validation, I/O).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource operation error (plist entry, printer, launch agent).
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Platform-specific operation error (unsupported operation, detection failure).
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors that arise from configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A plist entry declares an encoding with no `plutil` format equivalent.
    #[error("Unknown plist encoding '{0}': must be one of us-ascii, text/xml, utf-8, binary")]
    UnknownEncoding(String),

    /// The TOML file contains a syntax error that prevents parsing.
    #[error("Invalid TOML syntax in {file}: {message}")]
    InvalidSyntax {
        /// Config file that failed to parse.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from resource operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Plist command encoding or value decoding failed.
    #[error(transparent)]
    Plist(#[from] PlistError),

    /// A printer operation failed.
    #[error("Printer error: {printer}: {reason}")]
    Printer {
        /// Printer device name.
        printer: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A launch agent operation failed.
    #[error("Launch agent error: {label}: {reason}")]
    LaunchAgent {
        /// Agent label.
        label: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

/// Errors that arise from platform-specific operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The user's home directory could not be determined.
    #[error("Cannot determine home directory: {0}")]
    NoHome(String),
}
