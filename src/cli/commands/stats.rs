//! Stats Command
//!
//! Overall goal and task statistics.

use console::style;

use crate::api::{HttpClient, SchedulerApi};
use crate::config::Config;
use crate::types::Result;

pub async fn run(config: &Config, json: bool) -> Result<()> {
    let api = HttpClient::new(&config.server)?;
    let stats = api.overview().await?;

    if json {
        let rendered = serde_json::to_string_pretty(&serde_json::json!({
            "goals": {"total": stats.goals.total, "active": stats.goals.active},
            "tasks": {
                "total": stats.tasks.total,
                "completed": stats.tasks.completed,
                "missed": stats.tasks.missed,
                "completion_rate": stats.tasks.completion_rate,
            },
        }))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("\n{}", style("Overview").bold());
    println!("{}", "─".repeat(40));
    println!("Goals:");
    println!("  Total:  {}", stats.goals.total);
    println!("  Active: {}", stats.goals.active);
    println!();
    println!("Tasks:");
    println!("  Total:     {}", stats.tasks.total);
    println!("  Completed: {}", stats.tasks.completed);
    println!("  Missed:    {}", stats.tasks.missed);
    println!("  Completion rate: {:.1}%", stats.tasks.completion_rate);
    Ok(())
}
