//! Plist entry tasks.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, process_resources_remove};
use crate::resources::Resource;
use crate::resources::plist_entry::PlistEntryResource;

/// Build one resource per configured plist entry.
fn build_resources<'a>(ctx: &'a Context) -> Vec<PlistEntryResource<'a>> {
    ctx.config
        .plists
        .iter()
        .map(|entry| PlistEntryResource::from_entry(entry, ctx.executor, &ctx.config.tools))
        .collect()
}

/// Converge all configured plist entries.
#[derive(Debug, Clone, Copy)]
pub struct ApplyPlists;

impl Task for ApplyPlists {
    fn name(&self) -> &str {
        "Plists"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_macos()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.plists.is_empty() {
            return Ok(TaskResult::Skipped("no plist entries configured".into()));
        }

        let resources = build_resources(ctx);
        let refs: Vec<&dyn Resource> = resources.iter().map(|r| r as &dyn Resource).collect();
        let stats = process_resources(ctx, &refs)?;
        Ok(stats.finish(ctx))
    }
}

/// Delete all configured plist entries.
#[derive(Debug, Clone, Copy)]
pub struct RemovePlists;

impl Task for RemovePlists {
    fn name(&self) -> &str {
        "Plists"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_macos()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.plists.is_empty() {
            return Ok(TaskResult::Skipped("no plist entries configured".into()));
        }

        let resources = build_resources(ctx);
        let refs: Vec<&dyn Resource> = resources.iter().map(|r| r as &dyn Resource).collect();
        let stats = process_resources_remove(ctx, &refs)?;
        Ok(stats.finish(ctx))
    }
}
