use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stride::ConfigLoader;

#[derive(Parser)]
#[command(name = "stride")]
#[command(
    version,
    about = "Terminal client for AI-assisted goal planning and daily task tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(long, short, help = "Only log errors")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a goal's AI-generated roadmap phase by phase
    Review {
        #[arg(help = "Goal to review")]
        goal_id: u64,
    },

    /// Manage goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Show today's task checklist
    Today,

    /// Update individual tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Show overall goal and task statistics
    Stats {
        #[arg(long, help = "Emit JSON instead of the text card")]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    /// Create a new goal
    Add {
        #[arg(help = "Goal title")]
        title: String,
        #[arg(long, short, help = "Detailed description")]
        description: Option<String>,
        #[arg(long, help = "Target completion date (YYYY-MM-DD)")]
        target: Option<String>,
    },
    /// List goals
    List {
        #[arg(long, help = "Filter by status (e.g. active)")]
        status: Option<String>,
    },
    /// Delete a goal
    Delete {
        #[arg(help = "Goal to delete")]
        goal_id: u64,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Mark a task completed
    Done {
        #[arg(help = "Task to complete")]
        task_id: u64,
        #[arg(long, help = "Reason recorded in the audit log")]
        reason: Option<String>,
    },
    /// Mark a task missed
    Miss {
        #[arg(help = "Task to mark missed")]
        task_id: u64,
        #[arg(long, help = "Reason recorded in the audit log")]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show,
    /// Show configuration file paths
    Path,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => ConfigLoader::show()?,
            ConfigAction::Path => ConfigLoader::show_path(),
        },
        command => {
            let config = ConfigLoader::load()?;
            let rt = Runtime::new()?;
            rt.block_on(async {
                match command {
                    Commands::Review { goal_id } => {
                        stride::cli::commands::review::run(&config, goal_id).await
                    }
                    Commands::Goal { action } => match action {
                        GoalAction::Add {
                            title,
                            description,
                            target,
                        } => {
                            stride::cli::commands::goal::add(&config, title, description, target)
                                .await
                        }
                        GoalAction::List { status } => {
                            stride::cli::commands::goal::list(&config, status).await
                        }
                        GoalAction::Delete { goal_id } => {
                            stride::cli::commands::goal::delete(&config, goal_id).await
                        }
                    },
                    Commands::Today => stride::cli::commands::today::run(&config).await,
                    Commands::Task { action } => match action {
                        TaskAction::Done { task_id, reason } => {
                            stride::cli::commands::task::done(&config, task_id, reason).await
                        }
                        TaskAction::Miss { task_id, reason } => {
                            stride::cli::commands::task::miss(&config, task_id, reason).await
                        }
                    },
                    Commands::Stats { json } => stride::cli::commands::stats::run(&config, json).await,
                    Commands::Config { .. } => unreachable!("handled before runtime setup"),
                }
            })?;
        }
    }

    Ok(())
}
