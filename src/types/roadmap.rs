//! Roadmap and phase models.
//!
//! The backend serves a roadmap's `phases` field in three shapes depending on
//! server revision and generation outcome: absent, a JSON-encoded string, or
//! an already-decoded array. The raw [`serde_json::Value`] is kept here;
//! decoding into [`Phase`] records happens in the wizard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A roadmap object as served by the roadmap endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roadmap {
    /// Unique identifier, required for approve/refine calls
    pub id: u64,

    /// Goal this roadmap belongs to
    #[serde(default)]
    pub goal_id: u64,

    /// Structured phases: absent, JSON-encoded string, or decoded array
    #[serde(default)]
    pub phases: Option<Value>,
}

/// One reviewable stage of a roadmap, post-normalization.
///
/// All free text has already been through the markdown normalizer; list
/// entries that normalized to empty strings have been dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Phase {
    pub title: String,
    pub timeline: String,
    pub goal: String,
    pub tasks: Vec<String>,
    pub success_criteria: Vec<String>,
}

/// Response body of `PUT /roadmaps/{id}/approve`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApprovalOutcome {
    /// Tasks materialized from the approved roadmap
    #[serde(default)]
    pub tasks_created: u64,

    /// Milestones materialized from the approved roadmap
    #[serde(default)]
    pub milestones_created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roadmap_accepts_all_phase_shapes() {
        let absent: Roadmap = serde_json::from_value(json!({"id": 7})).expect("valid");
        assert!(absent.phases.is_none());

        let null: Roadmap =
            serde_json::from_value(json!({"id": 7, "phases": null})).expect("valid");
        assert!(null.phases.is_none());

        let encoded: Roadmap =
            serde_json::from_value(json!({"id": 7, "phases": "[{\"title\":\"a\"}]"}))
                .expect("valid");
        assert!(matches!(encoded.phases, Some(Value::String(_))));

        let decoded: Roadmap =
            serde_json::from_value(json!({"id": 7, "phases": [{"title": "a"}]})).expect("valid");
        assert!(matches!(decoded.phases, Some(Value::Array(_))));
    }

    #[test]
    fn test_approval_outcome_defaults() {
        let outcome: ApprovalOutcome =
            serde_json::from_value(json!({"tasks_created": 12})).expect("valid");
        assert_eq!(outcome.tasks_created, 12);
        assert_eq!(outcome.milestones_created, 0);
    }
}
