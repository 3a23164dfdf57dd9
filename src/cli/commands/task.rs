//! Task Commands
//!
//! Status updates for individual tasks. The optional reason feeds the
//! server's audit log.

use crate::api::{HttpClient, SchedulerApi};
use crate::cli::output::Output;
use crate::config::Config;
use crate::types::{Result, TaskStatus, TaskUpdate};

pub async fn done(config: &Config, task_id: u64, reason: Option<String>) -> Result<()> {
    set_status(config, task_id, TaskStatus::Completed, reason).await
}

pub async fn miss(config: &Config, task_id: u64, reason: Option<String>) -> Result<()> {
    set_status(config, task_id, TaskStatus::Missed, reason).await
}

async fn set_status(
    config: &Config,
    task_id: u64,
    status: TaskStatus,
    reason: Option<String>,
) -> Result<()> {
    let api = HttpClient::new(&config.server)?;
    let task = api
        .update_task(task_id, &TaskUpdate::status(status, reason))
        .await?;
    Output::new().success(&format!("Task #{} marked {}: {}", task.id, status, task.title));
    Ok(())
}
