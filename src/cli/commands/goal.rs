//! Goal Commands
//!
//! Create, list, and delete goals.

use chrono::{NaiveDate, NaiveTime};
use console::style;

use crate::api::{HttpClient, SchedulerApi};
use crate::cli::output::Output;
use crate::config::Config;
use crate::types::{NewGoal, Result, StrideError};

pub async fn add(
    config: &Config,
    title: String,
    description: Option<String>,
    target: Option<String>,
) -> Result<()> {
    let target_date = target
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
                .map_err(|e| StrideError::config(format!("Invalid target date '{}': {}", raw, e)))
        })
        .transpose()?;

    let api = HttpClient::new(&config.server)?;
    let goal = api
        .create_goal(&NewGoal {
            title,
            description,
            target_date,
        })
        .await?;

    let out = Output::new();
    out.success(&format!("Goal #{} created: {}", goal.id, goal.title));
    out.info(&format!("Run 'stride review {}' to build its roadmap.", goal.id));
    Ok(())
}

pub async fn list(config: &Config, status: Option<String>) -> Result<()> {
    let api = HttpClient::new(&config.server)?;
    let goals = api.goals(status.as_deref()).await?;

    if goals.is_empty() {
        println!("No goals yet. Create one with 'stride goal add <title>'.");
        return Ok(());
    }

    println!("{:>5}  {:<10}  {:<12}  Title", "ID", "Status", "Target");
    for goal in goals {
        let target = goal
            .target_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:>5}  {:<10}  {:<12}  {}",
            goal.id,
            goal.status,
            target,
            style(goal.title).bold()
        );
    }
    Ok(())
}

pub async fn delete(config: &Config, goal_id: u64) -> Result<()> {
    let api = HttpClient::new(&config.server)?;
    api.delete_goal(goal_id).await?;
    Output::new().success(&format!("Goal #{} deleted.", goal_id));
    Ok(())
}
