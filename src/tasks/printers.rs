//! Printer tasks.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, process_resources_remove};
use crate::resources::Resource;
use crate::resources::printer::PrinterResource;

/// Build one resource per configured printer.
fn build_resources<'a>(ctx: &'a Context) -> Vec<PrinterResource<'a>> {
    ctx.config
        .printers
        .iter()
        .map(|entry| PrinterResource::new(entry.clone(), ctx.executor, &ctx.config.tools.powershell))
        .collect()
}

/// Converge all configured printers.
#[derive(Debug, Clone, Copy)]
pub struct ApplyPrinters;

impl Task for ApplyPrinters {
    fn name(&self) -> &str {
        "Printers"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_windows()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.printers.is_empty() {
            return Ok(TaskResult::Skipped("no printers configured".into()));
        }
        if !ctx.executor.which(&ctx.config.tools.powershell) {
            return Ok(TaskResult::Skipped(format!(
                "{} not found",
                ctx.config.tools.powershell
            )));
        }

        let resources = build_resources(ctx);
        let refs: Vec<&dyn Resource> = resources.iter().map(|r| r as &dyn Resource).collect();
        let stats = process_resources(ctx, &refs)?;
        Ok(stats.finish(ctx))
    }
}

/// Remove all configured printers.
#[derive(Debug, Clone, Copy)]
pub struct RemovePrinters;

impl Task for RemovePrinters {
    fn name(&self) -> &str {
        "Printers"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_windows()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.printers.is_empty() {
            return Ok(TaskResult::Skipped("no printers configured".into()));
        }
        if !ctx.executor.which(&ctx.config.tools.powershell) {
            return Ok(TaskResult::Skipped(format!(
                "{} not found",
                ctx.config.tools.powershell
            )));
        }

        let resources = build_resources(ctx);
        let refs: Vec<&dyn Resource> = resources.iter().map(|r| r as &dyn Resource).collect();
        let stats = process_resources_remove(ctx, &refs)?;
        Ok(stats.finish(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::printers::PrinterEntry;
    use crate::config::{Config, tools::Tools};
    use crate::platform::{Os, Platform};
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::test_log::TestLog;

    fn config_with(printers: Vec<PrinterEntry>) -> Config {
        Config {
            root: std::path::PathBuf::from("/tmp"),
            plists: Vec::new(),
            printers,
            launch_agents: Vec::new(),
            tools: Tools::default(),
        }
    }

    fn entry() -> PrinterEntry {
        PrinterEntry {
            name: "Office Laser".to_string(),
            driver: "HP LaserJet 4000 Series PS".to_string(),
            port: None,
            ipv4_address: Some("10.0.0.12".to_string()),
            shared: false,
            comment: None,
            location: None,
        }
    }

    #[test]
    fn should_not_run_off_windows() {
        let config = config_with(vec![entry()]);
        let platform = Platform::new(Os::Macos);
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
        assert!(!ApplyPrinters.should_run(&ctx));
        assert!(!RemovePrinters.should_run(&ctx));
    }

    #[test]
    fn run_skips_when_nothing_configured() {
        let config = config_with(Vec::new());
        let platform = Platform::new(Os::Windows);
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
        let result = ApplyPrinters.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(_)));
    }

    #[test]
    fn run_skips_when_powershell_missing() {
        let config = config_with(vec![entry()]);
        let platform = Platform::new(Os::Windows);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![]).with_which(false);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: false,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };
        let result = ApplyPrinters.run(&ctx).unwrap();
        assert!(
            matches!(result, TaskResult::Skipped(ref reason) if reason.contains("not found")),
            "expected skip for missing tool, got {result:?}"
        );
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn apply_installs_missing_printer() {
        let config = config_with(vec![entry()]);
        let platform = Platform::new(Os::Windows);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![
            (true, "::NOT_FOUND::\n".to_string()), // Get-Printer probe
            (true, String::new()),                 // Add-PrinterPort
            (true, String::new()),                 // Set-WmiInstance
        ])
        .with_which(true);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: false,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };
        let result = ApplyPrinters.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));

        let calls = executor.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[1].contains("Add-PrinterPort"), "got: {calls:?}");
        assert!(calls[2].contains("Set-WmiInstance"), "got: {calls:?}");
    }

    #[test]
    fn dry_run_previews_without_install() {
        let config = config_with(vec![entry()]);
        let platform = Platform::new(Os::Windows);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![
            (true, "::NOT_FOUND::\n".to_string()), // Get-Printer probe
        ])
        .with_which(true);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: true,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };
        let result = ApplyPrinters.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        // only the probe ran
        assert_eq!(executor.calls().len(), 1);
    }

    #[test]
    fn remove_uninstalls_present_printer() {
        let config = config_with(vec![entry()]);
        let platform = Platform::new(Os::Windows);
        let log = TestLog::default();
        let executor = MockExecutor::with_responses(vec![
            (true, "HP LaserJet 4000 Series PS\n".to_string()), // state probe
            (true, "HP LaserJet 4000 Series PS\n".to_string()), // remove's own probe
            (true, String::new()),                              // Remove-Printer
        ])
        .with_which(true);
        let ctx = Context {
            config: &config,
            platform: &platform,
            log: &log,
            dry_run: false,
            home: std::path::PathBuf::from("/home/test"),
            executor: &executor,
        };
        let result = RemovePrinters.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));
        let calls = executor.calls();
        assert!(
            calls[2].contains("Remove-Printer -Name 'Office Laser'"),
            "got: {calls:?}"
        );
    }
}
