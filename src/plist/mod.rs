//! Property-list command encoding and value decoding.
//!
//! macOS plists are never read or written directly: every mutation goes
//! through `PlistBuddy` and every read-back through `defaults`/`plutil`.
//! This module owns the two translation directions:
//!
//! - **encode** — [`command::build_command`] turns a logical operation plus a
//!   typed [`PlistValue`] into the exact quoted `PlistBuddy` invocation.
//! - **decode** — [`value::decode`] turns a type tag and the raw string read
//!   back from `defaults` into a typed [`PlistValue`].

pub mod command;
pub mod value;

pub use command::{PlistOp, build_command};
pub use value::{PlistValue, decode};

use thiserror::Error;

/// Errors produced by the plist translator.
///
/// Both variants are fatal to the calling operation and carry the offending
/// value or tag; all other failures (missing file, tool not found, non-zero
/// exit) are surfaced unchanged by the [`Executor`](crate::exec::Executor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlistError {
    /// A value cannot be rendered into a `PlistBuddy` command segment.
    #[error("Unknown or unsupported data type: {value} of type {type_name}")]
    UnsupportedDataType {
        /// Rendering of the offending value.
        value: String,
        /// Name of the offending value's type.
        type_name: String,
    },

    /// A type tag read back from `defaults read-type` is not recognised.
    #[error("Unknown or unsupported data type: {0}")]
    UnsupportedTypeTag(String),
}
