//! Task, daily checklist, and statistics models.
//!
//! The backend encodes task status as an integer: -1 missed, 0 due,
//! 1 completed. [`TaskStatus`] keeps that wire encoding behind an enum.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Wire-compatible task status (-1 missed, 0 due, 1 completed).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "i8", into = "i8")]
pub enum TaskStatus {
    Missed,
    #[default]
    Due,
    Completed,
}

impl From<i8> for TaskStatus {
    fn from(value: i8) -> Self {
        match value {
            -1 => Self::Missed,
            1 => Self::Completed,
            _ => Self::Due,
        }
    }
}

impl From<TaskStatus> for i8 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Missed => -1,
            TaskStatus::Due => 0,
            TaskStatus::Completed => 1,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missed => write!(f, "missed"),
            Self::Due => write!(f, "due"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A scheduled task derived from an approved roadmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    #[serde(default)]
    pub milestone_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
}

/// Request body for `PUT /tasks/{id}`. Absent fields are left unchanged
/// server-side; `reason` feeds the server's audit log.
#[derive(Debug, Clone, Serialize, Default)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TaskUpdate {
    /// Status-only update with an optional audit reason
    pub fn status(status: TaskStatus, reason: Option<String>) -> Self {
        Self {
            status: Some(status),
            reason,
            ..Self::default()
        }
    }
}

/// Response of `GET /tasks/today`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyTasks {
    /// The backend serializes this as a full ISO datetime
    /// ("2026-08-30T00:00:00"); only the calendar day matters here
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    pub total: u32,
    pub completed: u32,
    pub due: u32,
    pub missed: u32,
}

/// Accept both the backend's datetime encoding and a bare date.
fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(datetime) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// Response of `GET /stats/overview`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewStats {
    pub goals: GoalStats,
    pub tasks: TaskStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalStats {
    pub total: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStats {
    pub total: u64,
    pub completed: u64,
    pub missed: u64,
    #[serde(default)]
    pub completion_rate: f64,
}
