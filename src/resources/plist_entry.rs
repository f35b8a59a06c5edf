//! macOS plist entry resource.
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{Resource, ResourceChange, ResourceState};
use crate::config::plists::PlistEntry;
use crate::config::tools::Tools;
use crate::error::ResourceError;
use crate::exec::Executor;
use crate::plist::{PlistOp, PlistValue, build_command, decode};

/// A plist entry resource that can be checked, applied, and removed.
///
/// Never touches the plist file directly: existence is probed with a
/// `PlistBuddy` `Print`, values are read back through `defaults`/`plutil`,
/// and mutations go through `PlistBuddy` `Add`/`Set`/`Delete`.
#[derive(Debug)]
pub struct PlistEntryResource<'a> {
    /// Path to the plist file.
    pub file: String,
    /// Entry path within the plist.
    pub entry: String,
    /// Desired typed value.
    pub desired: PlistValue,
    /// `plutil -convert` format applied after a change, when configured.
    pub format: Option<&'static str>,
    executor: &'a dyn Executor,
    tools: &'a Tools,
}

impl<'a> PlistEntryResource<'a> {
    /// Create a new plist entry resource.
    #[must_use]
    pub fn new(
        file: String,
        entry: String,
        desired: PlistValue,
        format: Option<&'static str>,
        executor: &'a dyn Executor,
        tools: &'a Tools,
    ) -> Self {
        Self {
            file,
            entry,
            desired,
            format,
            executor,
            tools,
        }
    }

    /// Create from a config entry.
    #[must_use]
    pub fn from_entry(entry: &PlistEntry, executor: &'a dyn Executor, tools: &'a Tools) -> Self {
        Self::new(
            entry.file.clone(),
            entry.entry.clone(),
            entry.value.clone(),
            entry.format,
            executor,
            tools,
        )
    }

    /// Probe whether the entry exists, via `Print` exit status.
    fn entry_exists(&self) -> Result<bool> {
        let command = build_command(
            PlistOp::Print,
            &self.entry,
            &self.file,
            None,
            &self.tools.plistbuddy,
        )?;
        Ok(self.executor.run_shell_unchecked(&command)?.success)
    }

    /// Read the entry's current typed value back from the plist.
    ///
    /// The type tag comes from `defaults read-type`; scalar values are then
    /// read with `defaults read` and decoded, while dictionary- and
    /// array-typed entries are extracted as XML with `plutil` and parsed.
    fn read_back(&self) -> Result<PlistValue> {
        let type_output = self
            .executor
            .run_unchecked(&self.tools.defaults, &["read-type", &self.file, &self.entry])?;
        let tag = type_output.stdout.split_whitespace().last().map(ToString::to_string);

        match tag.as_deref() {
            Some("dictionary" | "array") => {
                let xml = self.executor.run_unchecked(
                    &self.tools.plutil,
                    &["-extract", &self.entry, "xml1", "-o", "-", &self.file],
                )?;
                let parsed = plist::Value::from_reader_xml(Cursor::new(xml.stdout.into_bytes()))
                    .with_context(|| {
                        format!("parsing extracted plist for entry '{}'", self.entry)
                    })?;
                Ok(PlistValue::try_from(parsed).map_err(ResourceError::Plist)?)
            }
            other => {
                let value_output = self
                    .executor
                    .run_unchecked(&self.tools.defaults, &["read", &self.file, &self.entry])?;
                Ok(decode(other, value_output.stdout.trim()).map_err(ResourceError::Plist)?)
            }
        }
    }

    /// Re-encode the plist file when an encoding is configured.
    fn convert_encoding(&self) -> Result<()> {
        if let Some(format) = self.format {
            self.executor
                .run(&self.tools.plutil, &["-convert", format, &self.file])?;
        }
        Ok(())
    }
}

impl Resource for PlistEntryResource<'_> {
    fn description(&self) -> String {
        format!("{} in {} = {}", self.entry, self.file, self.desired)
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !Path::new(&self.file).exists() {
            return Ok(ResourceState::Missing);
        }
        if !self.entry_exists()? {
            return Ok(ResourceState::Missing);
        }

        let current = self.read_back()?;
        if current == self.desired {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: current.to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        // Add creates the file as a side effect when it does not exist yet.
        if !Path::new(&self.file).exists() || !self.entry_exists()? {
            let add = build_command(
                PlistOp::Add,
                &self.entry,
                &self.file,
                Some(&self.desired),
                &self.tools.plistbuddy,
            )?;
            self.executor.run_shell(&add)?;
        }

        let set = build_command(
            PlistOp::Set,
            &self.entry,
            &self.file,
            Some(&self.desired),
            &self.tools.plistbuddy,
        )?;
        self.executor.run_shell(&set)?;

        self.convert_encoding()?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !Path::new(&self.file).exists() || !self.entry_exists()? {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let delete = build_command(
            PlistOp::Delete,
            &self.entry,
            &self.file,
            None,
            &self.tools.plistbuddy,
        )?;
        self.executor.run_shell(&delete)?;

        self.convert_encoding()?;
        Ok(ResourceChange::Applied)
    }
}
