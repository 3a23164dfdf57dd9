//! Roadmap Review Wizard
//!
//! Owns the lifecycle of reviewing one goal's roadmap: resolve it (load the
//! existing one or trigger generation with a single bounded retry), decode
//! the phases, paginate through them one at a time, and drive the terminal
//! approve/refine actions against the backend.
//!
//! ## State machine
//!
//! ```text
//! Loading → PhaseReview ⇄ FinalReview → Approving → Done
//!                              │             │
//!                              │             └─(failure)→ FinalReview
//!                              └→ RefineSubmitting ─(success)→ PhaseReview (phase 0)
//!                                        └─(failure)→ FinalReview
//! ```
//!
//! All session state lives in [`WizardSession`]; nothing is ambient. At most
//! one request is in flight at a time and there is no cancellation path.

pub mod view;

use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::api::SchedulerApi;
use crate::constants::wizard::{FALLBACK_TITLE, MAX_PHASES};
use crate::text::clean;
use crate::types::{ApprovalOutcome, Phase, Result, Roadmap, StrideError};

/// Where the wizard currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Resolving the roadmap; nothing reviewable yet
    Loading,
    /// Navigating phases one at a time
    PhaseReview,
    /// Past the last phase; approve or request changes
    FinalReview,
    /// Approval call in flight
    Approving,
    /// Refine call in flight
    RefineSubmitting,
    /// Roadmap approved; the session is finished
    Done,
}

/// Navigation actions available in phase review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Next,
    Jump(usize),
}

/// One review session for a single goal.
///
/// Invariant: whenever `phases` is non-empty, `current < phases.len()`.
/// Replacing the phase list (initial resolve or successful refine) resets
/// `current` to 0.
pub struct WizardSession {
    goal_id: u64,
    roadmap_id: Option<u64>,
    phases: Vec<Phase>,
    current: usize,
    state: WizardState,
    retry_delay: Duration,
}

impl WizardSession {
    pub fn new(goal_id: u64, retry_delay: Duration) -> Self {
        Self {
            goal_id,
            roadmap_id: None,
            phases: Vec::new(),
            current: 0,
            state: WizardState::Loading,
            retry_delay,
        }
    }

    pub fn goal_id(&self) -> u64 {
        self.goal_id
    }

    pub fn roadmap_id(&self) -> Option<u64> {
        self.roadmap_id
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases.get(self.current)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve the goal's roadmap and enter phase review.
    ///
    /// Safe to call again after a resolution failure: it restarts the whole
    /// load-or-generate algorithm from scratch (the manual retry affordance).
    pub async fn resolve(&mut self, api: &dyn SchedulerApi) -> Result<()> {
        self.state = WizardState::Loading;
        let roadmap = self.resolve_roadmap(api).await?;
        self.roadmap_id = Some(roadmap.id);
        self.phases = parse_phases(&roadmap);
        self.current = 0;
        self.state = WizardState::PhaseReview;
        Ok(())
    }

    /// Two-step resolution: attempt the optimistic load, decide whether
    /// generation is needed, then attempt generation with one fixed-delay
    /// retry. Session expiry short-circuits from any step.
    async fn resolve_roadmap(&self, api: &dyn SchedulerApi) -> Result<Roadmap> {
        match api.roadmap(self.goal_id).await {
            Ok(roadmap) if has_structured_phases(&roadmap) => {
                debug!(roadmap_id = roadmap.id, "Existing roadmap is ready");
                return Ok(roadmap);
            }
            Ok(_) => debug!("Existing roadmap lacks structured phases; generating"),
            Err(StrideError::SessionExpired) => return Err(StrideError::SessionExpired),
            Err(e) => debug!(error = %e, "No usable existing roadmap; generating"),
        }

        match api.generate_roadmap(self.goal_id).await {
            Ok(roadmap) => Ok(roadmap),
            Err(StrideError::SessionExpired) => Err(StrideError::SessionExpired),
            Err(first) => {
                warn!(error = %first, delay_ms = self.retry_delay.as_millis() as u64,
                    "Roadmap generation failed; retrying once");
                sleep(self.retry_delay).await;
                match api.generate_roadmap(self.goal_id).await {
                    Ok(roadmap) => Ok(roadmap),
                    Err(StrideError::SessionExpired) => Err(StrideError::SessionExpired),
                    Err(second) => Err(StrideError::RoadmapResolution(second.to_string())),
                }
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Apply a navigation action.
    ///
    /// Boundaries never move the index out of range: `Prev` at phase 0 is a
    /// no-op and `Next` at the last phase transitions to final review
    /// instead of advancing. `Jump` ignores out-of-range targets.
    pub fn navigate(&mut self, action: NavAction) {
        match action {
            NavAction::Prev => {
                if self.current > 0 {
                    self.current -= 1;
                }
            }
            NavAction::Next => {
                if self.current + 1 < self.phases.len() {
                    self.current += 1;
                } else {
                    self.state = WizardState::FinalReview;
                }
            }
            NavAction::Jump(index) => {
                if index < self.phases.len() {
                    self.current = index;
                }
            }
        }
    }

    /// Return from final review to the phase navigator without losing place.
    pub fn back_to_phases(&mut self) {
        if self.state == WizardState::FinalReview {
            self.state = WizardState::PhaseReview;
        }
    }

    // =========================================================================
    // Terminal actions
    // =========================================================================

    /// Approve the resolved roadmap, finalizing it into tasks.
    ///
    /// On failure the session returns to final review with all prior state
    /// intact so the action can be retried.
    pub async fn approve(&mut self, api: &dyn SchedulerApi) -> Result<ApprovalOutcome> {
        let roadmap_id = self.roadmap_id.ok_or(StrideError::NoRoadmap)?;
        self.state = WizardState::Approving;
        match api.approve_roadmap(roadmap_id).await {
            Ok(outcome) => {
                self.state = WizardState::Done;
                Ok(outcome)
            }
            Err(e) => {
                self.state = WizardState::FinalReview;
                Err(e)
            }
        }
    }

    /// Submit refine feedback and replace the phase list with the result.
    ///
    /// Empty feedback is rejected locally with no network call. On success
    /// navigation restarts at phase 0; on failure the session returns to
    /// final review.
    pub async fn refine(&mut self, api: &dyn SchedulerApi, feedback: &str) -> Result<()> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(StrideError::EmptyFeedback);
        }
        let roadmap_id = self.roadmap_id.ok_or(StrideError::NoRoadmap)?;
        self.state = WizardState::RefineSubmitting;
        match api.refine_roadmap(roadmap_id, feedback).await {
            Ok(roadmap) => {
                self.roadmap_id = Some(roadmap.id);
                self.phases = parse_phases(&roadmap);
                self.current = 0;
                self.state = WizardState::PhaseReview;
                Ok(())
            }
            Err(e) => {
                self.state = WizardState::FinalReview;
                Err(e)
            }
        }
    }
}

// =============================================================================
// Phase decoding
// =============================================================================

/// Decode a roadmap's `phases` field into reviewable phases.
///
/// Accepts all three wire shapes (absent, JSON-encoded string, decoded
/// array), keeps at most the first [`MAX_PHASES`] entries, and normalizes
/// every free-text value. Never fails: absent, unparseable, or empty phases
/// degrade to a single informational fallback phase.
pub fn parse_phases(roadmap: &Roadmap) -> Vec<Phase> {
    match decode_entries(roadmap.phases.as_ref()) {
        Some(entries) if !entries.is_empty() => entries
            .iter()
            .take(MAX_PHASES)
            .enumerate()
            .map(|(index, entry)| phase_from_value(index, entry))
            .collect(),
        _ => vec![fallback_phase()],
    }
}

/// Whether the roadmap already carries a non-empty structured phase list.
/// This is the "no generation needed" test of the resolution algorithm.
pub fn has_structured_phases(roadmap: &Roadmap) -> bool {
    decode_entries(roadmap.phases.as_ref()).is_some_and(|entries| !entries.is_empty())
}

fn decode_entries(phases: Option<&Value>) -> Option<Vec<Value>> {
    match phases? {
        Value::Array(entries) => Some(entries.clone()),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(entries)) => Some(entries),
            _ => None,
        },
        _ => None,
    }
}

fn phase_from_value(index: usize, entry: &Value) -> Phase {
    let text = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .map(clean)
            .unwrap_or_default()
    };
    let list = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(clean)
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    };

    let title = match text("title") {
        t if t.is_empty() => format!("Phase {}", index + 1),
        t => t,
    };

    Phase {
        title,
        timeline: text("timeline"),
        goal: text("goal"),
        tasks: list("tasks"),
        success_criteria: list("success_criteria"),
    }
}

fn fallback_phase() -> Phase {
    Phase {
        title: FALLBACK_TITLE.to_string(),
        timeline: String::new(),
        goal: "Structured phases could not be loaded for this roadmap.".to_string(),
        tasks: Vec::new(),
        success_criteria: Vec::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::types::{DailyTasks, Goal, NewGoal, OverviewStats, Task, TaskUpdate};

    /// In-memory API double with queued results per endpoint.
    #[derive(Default)]
    struct FakeApi {
        roadmap: Mutex<VecDeque<Result<Roadmap>>>,
        generate: Mutex<VecDeque<Result<Roadmap>>>,
        approve: Mutex<VecDeque<Result<ApprovalOutcome>>>,
        refine: Mutex<VecDeque<Result<Roadmap>>>,
        generate_calls: AtomicUsize,
        refine_calls: AtomicUsize,
    }

    impl FakeApi {
        fn queue_roadmap(&self, result: Result<Roadmap>) {
            self.roadmap.lock().unwrap().push_back(result);
        }

        fn queue_generate(&self, result: Result<Roadmap>) {
            self.generate.lock().unwrap().push_back(result);
        }

        fn queue_approve(&self, result: Result<ApprovalOutcome>) {
            self.approve.lock().unwrap().push_back(result);
        }

        fn queue_refine(&self, result: Result<Roadmap>) {
            self.refine.lock().unwrap().push_back(result);
        }
    }

    fn server_error() -> StrideError {
        StrideError::api(500, "generation backend unavailable")
    }

    #[async_trait]
    impl SchedulerApi for FakeApi {
        async fn goal(&self, _goal_id: u64) -> Result<Goal> {
            unimplemented!("not used by wizard tests")
        }

        async fn goals(&self, _status: Option<&str>) -> Result<Vec<Goal>> {
            unimplemented!("not used by wizard tests")
        }

        async fn create_goal(&self, _goal: &NewGoal) -> Result<Goal> {
            unimplemented!("not used by wizard tests")
        }

        async fn delete_goal(&self, _goal_id: u64) -> Result<()> {
            unimplemented!("not used by wizard tests")
        }

        async fn roadmap(&self, _goal_id: u64) -> Result<Roadmap> {
            self.roadmap
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(server_error()))
        }

        async fn generate_roadmap(&self, _goal_id: u64) -> Result<Roadmap> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            self.generate
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(server_error()))
        }

        async fn approve_roadmap(&self, _roadmap_id: u64) -> Result<ApprovalOutcome> {
            self.approve
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(server_error()))
        }

        async fn refine_roadmap(&self, _roadmap_id: u64, _feedback: &str) -> Result<Roadmap> {
            self.refine_calls.fetch_add(1, Ordering::SeqCst);
            self.refine
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(server_error()))
        }

        async fn today(&self) -> Result<DailyTasks> {
            unimplemented!("not used by wizard tests")
        }

        async fn update_task(&self, _task_id: u64, _update: &TaskUpdate) -> Result<Task> {
            unimplemented!("not used by wizard tests")
        }

        async fn overview(&self) -> Result<OverviewStats> {
            unimplemented!("not used by wizard tests")
        }
    }

    fn roadmap_with(phases: Value) -> Roadmap {
        Roadmap {
            id: 7,
            goal_id: 42,
            phases: Some(phases),
        }
    }

    fn phase_entry(title: &str) -> Value {
        json!({
            "title": title,
            "timeline": "Weeks 1-2",
            "goal": "Get the basics down",
            "tasks": ["Do a thing"],
            "success_criteria": ["Thing is done"]
        })
    }

    fn session() -> WizardSession {
        WizardSession::new(42, Duration::ZERO)
    }

    async fn resolved_session(api: &FakeApi, phase_count: usize) -> WizardSession {
        let entries: Vec<Value> = (0..phase_count)
            .map(|i| phase_entry(&format!("Phase title {}", i)))
            .collect();
        api.queue_roadmap(Ok(roadmap_with(json!(entries))));
        let mut session = session();
        session.resolve(api).await.expect("resolve");
        session
    }

    // -------------------------------------------------------------------------
    // parse_phases
    // -------------------------------------------------------------------------

    #[test]
    fn test_truncates_to_first_ten_phases() {
        let entries: Vec<Value> = (0..14).map(|i| json!({"title": format!("P{}", i)})).collect();
        let phases = parse_phases(&roadmap_with(json!(entries)));
        assert_eq!(phases.len(), 10);
        assert_eq!(phases[0].title, "P0");
        assert_eq!(phases[9].title, "P9");
    }

    #[test]
    fn test_preserves_well_formed_phases() {
        let entries = json!([
            {
                "title": "## Foundations",
                "timeline": "**Weeks 1-4**",
                "goal": "Build *core* habits",
                "tasks": ["- run daily", "  ", "`log` progress"],
                "success_criteria": ["1. 5k without stopping"]
            },
            {"title": "Base building"}
        ]);
        let phases = parse_phases(&roadmap_with(entries));
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].title, "Foundations");
        assert_eq!(phases[0].timeline, "Weeks 1-4");
        assert_eq!(phases[0].goal, "Build core habits");
        // Entries that normalize to empty are dropped
        assert_eq!(phases[0].tasks, vec!["run daily", "log progress"]);
        assert_eq!(phases[0].success_criteria, vec!["5k without stopping"]);
        assert_eq!(phases[1].title, "Base building");
        assert!(phases[1].tasks.is_empty());
    }

    #[test]
    fn test_accepts_json_encoded_string_phases() {
        let phases = parse_phases(&roadmap_with(json!("[{\"title\": \"Encoded\"}]")));
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].title, "Encoded");
    }

    #[test]
    fn test_fallback_on_absent_or_unparseable_phases() {
        for phases_value in [None, Some(json!(null)), Some(json!("not json")), Some(json!("[]"))] {
            let roadmap = Roadmap {
                id: 7,
                goal_id: 42,
                phases: phases_value,
            };
            let phases = parse_phases(&roadmap);
            assert_eq!(phases.len(), 1);
            assert_eq!(phases[0].title, "Roadmap");
            assert!(phases[0].tasks.is_empty());
            assert!(phases[0].success_criteria.is_empty());
        }
    }

    #[test]
    fn test_untitled_entries_get_positional_titles() {
        let phases = parse_phases(&roadmap_with(json!([{"timeline": "Week 1"}, {"title": ""}])));
        assert_eq!(phases[0].title, "Phase 1");
        assert_eq!(phases[1].title, "Phase 2");
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_existing_structured_roadmap_skips_generation() {
        let api = FakeApi::default();
        api.queue_roadmap(Ok(roadmap_with(json!([phase_entry("Ready")]))));

        let mut session = session();
        session.resolve(&api).await.expect("resolve");

        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.roadmap_id(), Some(7));
        assert_eq!(session.state(), WizardState::PhaseReview);
        assert_eq!(session.current_index(), 0);
    }

    #[tokio::test]
    async fn test_null_phases_trigger_generation_then_fallback() {
        // GET returns {id: 7, phases: null}; POST returns {id: 7, phases: "[]"}
        let api = FakeApi::default();
        api.queue_roadmap(Ok(roadmap_with(json!(null))));
        api.queue_generate(Ok(roadmap_with(json!("[]"))));

        let mut session = session();
        session.resolve(&api).await.expect("resolve");

        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.phases().len(), 1);
        assert_eq!(session.phases()[0].title, "Roadmap");
        assert_eq!(session.roadmap_id(), Some(7));
    }

    #[tokio::test]
    async fn test_generation_retried_once_then_terminal() {
        let api = FakeApi::default();
        api.queue_roadmap(Err(server_error()));
        api.queue_generate(Err(server_error()));
        api.queue_generate(Err(server_error()));

        let mut session = session();
        let err = session.resolve(&api).await.expect_err("must fail");

        assert!(matches!(err, StrideError::RoadmapResolution(_)));
        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 2);
        // The phase-review UI was never reached
        assert_eq!(session.state(), WizardState::Loading);
        assert!(session.phases().is_empty());
    }

    #[tokio::test]
    async fn test_manual_retry_reruns_whole_resolution() {
        let api = FakeApi::default();
        api.queue_roadmap(Err(server_error()));
        api.queue_generate(Err(server_error()));
        api.queue_generate(Err(server_error()));

        let mut session = session();
        session.resolve(&api).await.expect_err("first attempt fails");

        // The retry affordance starts over: load attempt, then generation
        api.queue_roadmap(Err(server_error()));
        api.queue_generate(Ok(roadmap_with(json!([phase_entry("Second try")]))));
        session.resolve(&api).await.expect("retry succeeds");

        assert_eq!(session.state(), WizardState::PhaseReview);
        assert_eq!(session.phases()[0].title, "Second try");
    }

    #[tokio::test]
    async fn test_session_expiry_short_circuits_resolution() {
        let api = FakeApi::default();
        api.queue_roadmap(Err(StrideError::SessionExpired));

        let mut session = session();
        let err = session.resolve(&api).await.expect_err("must bubble");

        assert!(err.is_session_expired());
        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 0);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_prev_at_first_phase_is_noop() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 3).await;

        session.navigate(NavAction::Prev);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.state(), WizardState::PhaseReview);
    }

    #[tokio::test]
    async fn test_next_at_last_phase_enters_final_review() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 3).await;

        session.navigate(NavAction::Jump(2));
        assert_eq!(session.current_index(), 2);

        session.navigate(NavAction::Next);
        // Index never goes out of range; the state flips instead
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.state(), WizardState::FinalReview);

        session.back_to_phases();
        assert_eq!(session.state(), WizardState::PhaseReview);
        assert_eq!(session.current_index(), 2);
    }

    #[tokio::test]
    async fn test_jump_ignores_out_of_range_targets() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 3).await;

        session.navigate(NavAction::Jump(9));
        assert_eq!(session.current_index(), 0);
    }

    #[tokio::test]
    async fn test_single_phase_roadmap_goes_straight_to_final_review() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 1).await;

        session.navigate(NavAction::Next);
        assert_eq!(session.state(), WizardState::FinalReview);
        assert_eq!(session.current_index(), 0);
    }

    // -------------------------------------------------------------------------
    // Approve / refine
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_approve_success_finishes_session() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 2).await;
        api.queue_approve(Ok(ApprovalOutcome {
            tasks_created: 12,
            milestones_created: 3,
        }));

        let outcome = session.approve(&api).await.expect("approve");
        assert_eq!(outcome.tasks_created, 12);
        assert_eq!(outcome.milestones_created, 3);
        assert_eq!(session.state(), WizardState::Done);
    }

    #[tokio::test]
    async fn test_approve_failure_returns_to_final_review() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 2).await;
        api.queue_approve(Err(StrideError::api(500, "task creation failed")));

        let err = session.approve(&api).await.expect_err("must fail");
        assert!(matches!(err, StrideError::Api { status: 500, .. }));
        assert_eq!(session.state(), WizardState::FinalReview);
        // Prior session state stays valid for another attempt
        assert_eq!(session.roadmap_id(), Some(7));
        assert_eq!(session.phases().len(), 2);
    }

    #[tokio::test]
    async fn test_approve_without_resolution_is_rejected() {
        let api = FakeApi::default();
        let mut unresolved = session();
        let err = unresolved.approve(&api).await.expect_err("precondition");
        assert!(matches!(err, StrideError::NoRoadmap));
    }

    #[tokio::test]
    async fn test_refine_replaces_phases_and_resets_index() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 4).await;
        session.navigate(NavAction::Jump(3));
        session.navigate(NavAction::Next);
        assert_eq!(session.state(), WizardState::FinalReview);

        api.queue_refine(Ok(roadmap_with(json!([
            phase_entry("Reworked opening"),
            phase_entry("Reworked close")
        ]))));

        session.refine(&api, "make it shorter").await.expect("refine");
        assert_eq!(session.state(), WizardState::PhaseReview);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.phases().len(), 2);
        assert_eq!(session.phases()[0].title, "Reworked opening");
    }

    #[tokio::test]
    async fn test_refine_failure_returns_to_final_review() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 2).await;
        session.navigate(NavAction::Jump(1));
        session.navigate(NavAction::Next);
        api.queue_refine(Err(StrideError::api(503, "model overloaded")));

        let err = session.refine(&api, "more detail").await.expect_err("fails");
        assert!(matches!(err, StrideError::Api { status: 503, .. }));
        assert_eq!(session.state(), WizardState::FinalReview);
        assert_eq!(session.phases().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_feedback_rejected_without_network_call() {
        let api = FakeApi::default();
        let mut session = resolved_session(&api, 2).await;

        let err = session.refine(&api, "   ").await.expect_err("local reject");
        assert!(matches!(err, StrideError::EmptyFeedback));
        assert_eq!(api.refine_calls.load(Ordering::SeqCst), 0);
    }
}
