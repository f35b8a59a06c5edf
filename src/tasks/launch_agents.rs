//! Launch agent tasks.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources, process_resources_remove};
use crate::resources::Resource;
use crate::resources::launch_agent::LaunchAgentResource;

/// Build one resource per configured launch agent.
fn build_resources<'a>(ctx: &'a Context) -> Vec<LaunchAgentResource<'a>> {
    ctx.config
        .launch_agents
        .iter()
        .map(|entry| {
            LaunchAgentResource::new(
                entry.clone(),
                &ctx.home,
                ctx.executor,
                &ctx.config.tools.launchctl,
            )
        })
        .collect()
}

/// Converge all configured launch agents.
#[derive(Debug, Clone, Copy)]
pub struct ApplyLaunchAgents;

impl Task for ApplyLaunchAgents {
    fn name(&self) -> &str {
        "Launch agents"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_macos()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.launch_agents.is_empty() {
            return Ok(TaskResult::Skipped("no launch agents configured".into()));
        }

        let resources = build_resources(ctx);
        let refs: Vec<&dyn Resource> = resources.iter().map(|r| r as &dyn Resource).collect();
        let stats = process_resources(ctx, &refs)?;
        Ok(stats.finish(ctx))
    }
}

/// Unload and delete all configured launch agents.
#[derive(Debug, Clone, Copy)]
pub struct RemoveLaunchAgents;

impl Task for RemoveLaunchAgents {
    fn name(&self) -> &str {
        "Launch agents"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_macos()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.config.launch_agents.is_empty() {
            return Ok(TaskResult::Skipped("no launch agents configured".into()));
        }

        let resources = build_resources(ctx);
        let refs: Vec<&dyn Resource> = resources.iter().map(|r| r as &dyn Resource).collect();
        let stats = process_resources_remove(ctx, &refs)?;
        Ok(stats.finish(ctx))
    }
}
