//! Stride - Terminal Client for AI-Assisted Goal Planning
//!
//! Client for the AI-Scheduler backend: create goals, review the
//! AI-generated multi-phase roadmap in an interactive wizard, and track the
//! daily tasks derived from the approved plan.
//!
//! ## Core Flow
//!
//! 1. `stride goal add` creates a goal on the server
//! 2. `stride review <goal-id>` resolves the goal's roadmap (loading the
//!    existing one or triggering generation with a single bounded retry),
//!    pages through its phases, and drives approve/refine
//! 3. `stride today` shows the task checklist once a roadmap is approved
//!
//! ## Modules
//!
//! - [`wizard`]: the roadmap review state machine
//! - [`api`]: the backend seam ([`api::SchedulerApi`]) and its reqwest client
//! - [`text`]: the markdown-stripping display normalizer
//! - [`config`]: figment-based configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use stride::{HttpClient, WizardSession};
//!
//! let api = HttpClient::new(&config.server)?;
//! let mut session = WizardSession::new(goal_id, Duration::from_millis(2500));
//! session.resolve(&api).await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod text;
pub mod types;
pub mod wizard;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ServerConfig, WizardConfig};

// Error Types
pub use types::error::{Result, StrideError};

// Domain Types
pub use types::{
    ApprovalOutcome, DailyTasks, Goal, NewGoal, OverviewStats, Phase, Roadmap, Task, TaskStatus,
    TaskUpdate,
};

// Backend Seam
pub use api::{HttpClient, SchedulerApi};

// Wizard
pub use text::clean;
pub use wizard::{NavAction, WizardSession, WizardState, has_structured_phases, parse_phases};
