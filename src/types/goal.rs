//! Goal model definitions.
//!
//! Mirrors the backend's goal resource. Unknown fields in responses are
//! ignored so the client stays compatible across server revisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A long-term goal as served by `GET /goals/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier for the goal
    pub id: u64,

    /// Goal title, used as the wizard header
    pub title: String,

    /// Optional detailed description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional target completion date
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,

    /// Lifecycle status reported by the server (e.g. "active")
    #[serde(default)]
    pub status: String,
}

/// Request body for `POST /goals`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_tolerates_missing_optionals() {
        let goal: Goal =
            serde_json::from_str(r#"{"id": 42, "title": "Learn Rust"}"#).expect("valid goal");
        assert_eq!(goal.id, 42);
        assert_eq!(goal.title, "Learn Rust");
        assert!(goal.target_date.is_none());
        assert!(goal.status.is_empty());
    }

    #[test]
    fn test_new_goal_skips_absent_fields() {
        let body = serde_json::to_string(&NewGoal {
            title: "Run a marathon".to_string(),
            description: None,
            target_date: None,
        })
        .expect("serializable");
        assert_eq!(body, r#"{"title":"Run a marathon"}"#);
    }
}
