//! Windows printer resource.
use std::fmt::Write as _;

use anyhow::{Context as _, Result};

use super::{Resource, ResourceChange, ResourceState};
use crate::config::printers::PrinterEntry;
use crate::error::ResourceError;
use crate::exec::Executor;

/// A Windows printer resource that can be checked, installed, and removed.
///
/// All operations go through PowerShell: `Get-Printer` for probing,
/// `Set-WmiInstance` on `Win32_Printer` for installation, and
/// `Remove-Printer` for removal.
#[derive(Debug)]
pub struct PrinterResource<'a> {
    /// Desired printer definition.
    pub entry: PrinterEntry,
    executor: &'a dyn Executor,
    powershell: &'a str,
}

/// Sentinel emitted by probe scripts when the printer does not exist.
const NOT_FOUND: &str = "::NOT_FOUND::";

impl<'a> PrinterResource<'a> {
    /// Create a new printer resource.
    #[must_use]
    pub fn new(entry: PrinterEntry, executor: &'a dyn Executor, powershell: &'a str) -> Self {
        Self {
            entry,
            executor,
            powershell,
        }
    }

    fn run_script(&self, script: &str) -> Result<crate::exec::ExecResult> {
        self.executor
            .run(self.powershell, &["-NoProfile", "-Command", script])
    }

    /// Query the installed driver for this printer, `None` when absent.
    fn installed_driver(&self) -> Result<Option<String>> {
        let name = escape(&self.entry.name);
        let script = format!(
            "$ErrorActionPreference='SilentlyContinue'\n\
             $p = Get-Printer -Name '{name}' -ErrorAction SilentlyContinue\n\
             if ($null -eq $p) {{ Write-Output '{NOT_FOUND}' }} else {{ Write-Output $p.DriverName }}"
        );

        let result = self
            .executor
            .run_unchecked(self.powershell, &["-NoProfile", "-Command", &script])?;

        if !result.success {
            return Ok(None);
        }

        let output = result.stdout.trim();
        if output == NOT_FOUND {
            Ok(None)
        } else {
            Ok(Some(output.to_string()))
        }
    }

    /// Build the `Set-WmiInstance` arguments hashtable for this printer.
    fn wmi_arguments(&self) -> String {
        let mut args = format!(
            "DeviceID='{}'; DriverName='{}'",
            escape(&self.entry.name),
            escape(&self.entry.driver)
        );
        if let Some(port) = self.entry.port_name() {
            let _ = write!(args, "; PortName='{}'", escape(&port));
        }
        if self.entry.shared {
            args.push_str("; Shared=$true");
        }
        if let Some(comment) = &self.entry.comment {
            let _ = write!(args, "; Comment='{}'", escape(comment));
        }
        if let Some(location) = &self.entry.location {
            let _ = write!(args, "; Location='{}'", escape(location));
        }
        args
    }
}

impl Resource for PrinterResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.entry.name, self.entry.driver)
    }

    fn current_state(&self) -> Result<ResourceState> {
        self.installed_driver()?.map_or_else(
            || Ok(ResourceState::Missing),
            |driver| {
                if driver == self.entry.driver {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect { current: driver })
                }
            },
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        // Network printers need their TCP/IP port created first.
        if let (Some(port), Some(address)) = (self.entry.port_name(), &self.entry.ipv4_address) {
            let port = escape(&port);
            let address = escape(address);
            let script = format!(
                "if (!(Get-PrinterPort -Name '{port}' -ErrorAction SilentlyContinue)) \
                 {{ Add-PrinterPort -Name '{port}' -PrinterHostAddress '{address}' }}"
            );
            self.run_script(&script)
                .with_context(|| format!("create printer port: {}", self.entry.name))?;
        }

        let script = format!(
            "Set-WmiInstance -Class Win32_Printer -Arguments @{{{}}} | Out-Null",
            self.wmi_arguments()
        );
        self.run_script(&script).map_err(|err| ResourceError::Printer {
            printer: self.entry.name.clone(),
            reason: format!("install failed: {err:#}"),
        })?;

        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if self.installed_driver()?.is_none() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let script = format!("Remove-Printer -Name '{}'", escape(&self.entry.name));
        self.run_script(&script).map_err(|err| ResourceError::Printer {
            printer: self.entry.name.clone(),
            reason: format!("remove failed: {err:#}"),
        })?;

        Ok(ResourceChange::Applied)
    }
}

/// Escape a value for single-quoted PowerShell string literals.
fn escape(value: &str) -> String {
    value.replace('\'', "''")
}
