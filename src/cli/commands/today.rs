//! Today Command
//!
//! Today's task checklist with due/completed/missed counts.

use console::style;

use crate::api::{HttpClient, SchedulerApi};
use crate::config::Config;
use crate::types::{Result, TaskStatus};

pub async fn run(config: &Config) -> Result<()> {
    let api = HttpClient::new(&config.server)?;
    let daily = api.today().await?;

    println!("\n{}", style(format!("Tasks for {}", daily.date)).bold());
    println!("{}", "─".repeat(40));

    if daily.tasks.is_empty() {
        println!("Nothing scheduled today.");
        return Ok(());
    }

    for task in &daily.tasks {
        let glyph = match task.status {
            TaskStatus::Completed => style("✓").green(),
            TaskStatus::Due => style("○").cyan(),
            TaskStatus::Missed => style("✗").red(),
        };
        println!("  {} #{:<4} {}", glyph, task.id, task.title);
    }

    println!();
    println!(
        "{} total · {} completed · {} due · {} missed",
        daily.total, daily.completed, daily.due, daily.missed
    );
    Ok(())
}
