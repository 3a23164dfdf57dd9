//! Domain types shared across the client.

pub mod error;
pub mod goal;
pub mod roadmap;
pub mod task;

pub use error::{Result, StrideError};
pub use goal::{Goal, NewGoal};
pub use roadmap::{ApprovalOutcome, Phase, Roadmap};
pub use task::{DailyTasks, GoalStats, OverviewStats, Task, TaskStats, TaskStatus, TaskUpdate};
