//! Backend API abstraction.
//!
//! [`SchedulerApi`] is the seam between the wizard/commands and the network.
//! Production code uses the reqwest-backed [`HttpClient`]; tests drive the
//! wizard against an in-memory double.

mod http;

pub use http::HttpClient;

use async_trait::async_trait;

use crate::types::{
    ApprovalOutcome, DailyTasks, Goal, NewGoal, OverviewStats, Result, Roadmap, Task, TaskUpdate,
};

/// Client-side view of the AI-Scheduler REST API.
///
/// Every method maps to exactly one HTTP round trip. Implementations signal
/// session expiry with `StrideError::SessionExpired` so callers can abort the
/// active flow from any pending call.
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    /// `GET /goals/{id}` — goal metadata for header display
    async fn goal(&self, goal_id: u64) -> Result<Goal>;

    /// `GET /goals` — all goals, optionally filtered by status
    async fn goals(&self, status: Option<&str>) -> Result<Vec<Goal>>;

    /// `POST /goals` — create a goal
    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal>;

    /// `DELETE /goals/{id}`
    async fn delete_goal(&self, goal_id: u64) -> Result<()>;

    /// `GET /goals/{id}/roadmap` — fetch the existing roadmap
    async fn roadmap(&self, goal_id: u64) -> Result<Roadmap>;

    /// `POST /goals/{id}/roadmap` — generate or regenerate the roadmap
    async fn generate_roadmap(&self, goal_id: u64) -> Result<Roadmap>;

    /// `PUT /roadmaps/{id}/approve` — finalize the roadmap into tasks
    async fn approve_roadmap(&self, roadmap_id: u64) -> Result<ApprovalOutcome>;

    /// `POST /roadmaps/{id}/refine` — regenerate with user feedback
    async fn refine_roadmap(&self, roadmap_id: u64, feedback: &str) -> Result<Roadmap>;

    /// `GET /tasks/today` — today's checklist with counts
    async fn today(&self) -> Result<DailyTasks>;

    /// `PUT /tasks/{id}` — partial task update
    async fn update_task(&self, task_id: u64, update: &TaskUpdate) -> Result<Task>;

    /// `GET /stats/overview`
    async fn overview(&self) -> Result<OverviewStats>;
}
