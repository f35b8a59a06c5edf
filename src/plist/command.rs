//! `PlistBuddy` command encoding.
use std::fmt;

use super::{PlistError, PlistValue};

/// A `PlistBuddy` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistOp {
    /// Create an entry with an explicit type.
    Add,
    /// Set an entry's value.
    Set,
    /// Delete an entry.
    Delete,
    /// Print an entry (used as an existence probe).
    Print,
}

impl fmt::Display for PlistOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlistOp::Add => write!(f, "Add"),
            PlistOp::Set => write!(f, "Set"),
            PlistOp::Delete => write!(f, "Delete"),
            PlistOp::Print => write!(f, "Print"),
        }
    }
}

/// Build the full `PlistBuddy` invocation for one operation.
///
/// The entry path is wrapped in double quotes (entries may contain spaces),
/// the subcommand clause in single quotes, and the file path in double
/// quotes, so the result round-trips through a shell that splits on
/// whitespace but preserves quoted segments.
///
/// - `Add` appends the value's type tag, space-separated.
/// - `Set` with a dictionary joins each `key value` pair onto the entry with
///   `:` separators (nested-key addressing); any other value appends its
///   literal form space-separated.
/// - `Delete`/`Print` (and a missing value) append nothing; the clause
///   degrades to just the quoted entry path.
///
/// # Errors
///
/// Returns [`PlistError::UnsupportedDataType`] when the value has no literal
/// command form (an array in a `Set` position, or a container nested inside
/// a dictionary).
pub fn build_command(
    op: PlistOp,
    entry: &str,
    path: &str,
    value: Option<&PlistValue>,
    plistbuddy: &str,
) -> Result<String, PlistError> {
    let mut sep = " ";
    let arg = match (op, value) {
        (PlistOp::Add, Some(v)) => v.type_tag().to_string(),
        (PlistOp::Set, Some(PlistValue::Dict(map))) => {
            sep = ":";
            map.iter()
                .map(|(key, val)| Ok(format!("{key} {}", val.render()?)))
                .collect::<Result<Vec<_>, PlistError>>()?
                .join(":")
        }
        (PlistOp::Set, Some(v)) => v.render()?,
        _ => String::new(),
    };

    let entry_with_arg = format!("\"{entry}\"{sep}{arg}");
    let entry_with_arg = entry_with_arg.trim();
    Ok(format!("{plistbuddy} -c '{op} :{entry_with_arg}' \"{path}\""))
}
