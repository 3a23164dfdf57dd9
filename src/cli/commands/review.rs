//! Review Command
//!
//! Interactive roadmap review wizard for one goal. Drives the
//! [`WizardSession`] state machine from line input: phase navigation, then
//! final review with approve / request-changes. Exactly one request is in
//! flight at a time; the loop blocks on each call.

use std::time::Duration;

use console::Term;
use tracing::warn;

use crate::api::{HttpClient, SchedulerApi};
use crate::cli::output::Output;
use crate::config::Config;
use crate::types::{Result, StrideError};
use crate::wizard::{NavAction, WizardSession, WizardState, view};

pub async fn run(config: &Config, goal_id: u64) -> Result<()> {
    let api = HttpClient::new(&config.server)?;
    let out = Output::new();
    let term = Term::stdout();

    // Header metadata is display-only: failures are logged, not fatal
    let goal = match api.goal(goal_id).await {
        Ok(goal) => Some(goal),
        Err(StrideError::SessionExpired) => return Err(StrideError::SessionExpired),
        Err(e) => {
            warn!(goal_id, error = %e, "Could not load goal metadata");
            None
        }
    };

    let mut session = WizardSession::new(
        goal_id,
        Duration::from_millis(config.wizard.retry_delay_ms),
    );

    // Resolution with a manual whole-operation retry affordance
    loop {
        out.info("Loading roadmap...");
        match session.resolve(&api).await {
            Ok(()) => break,
            Err(StrideError::SessionExpired) => return Err(StrideError::SessionExpired),
            Err(e) => {
                view::render_resolution_error(&e);
                if !confirm(&term, "Retry loading the roadmap? [y/N] ")? {
                    return Ok(());
                }
            }
        }
    }

    loop {
        match session.state() {
            WizardState::PhaseReview => {
                view::render_header(goal.as_ref());
                view::render_phase(&session);
                view::render_phase_controls();
                match prompt(&term, "> ")?.as_str() {
                    "n" | "next" | "" => session.navigate(NavAction::Next),
                    "p" | "prev" => session.navigate(NavAction::Prev),
                    "q" | "quit" => return Ok(()),
                    input => match input.parse::<usize>() {
                        Ok(number) if number >= 1 => session.navigate(NavAction::Jump(number - 1)),
                        _ => out.warning("Unknown command."),
                    },
                }
            }
            WizardState::FinalReview => {
                view::render_header(goal.as_ref());
                view::render_final_review(&session);
                view::render_final_controls();
                match prompt(&term, "> ")?.as_str() {
                    "a" | "approve" => match session.approve(&api).await {
                        Ok(outcome) => {
                            out.success(&format!(
                                "Roadmap approved: {} tasks and {} milestones created.",
                                outcome.tasks_created, outcome.milestones_created
                            ));
                        }
                        Err(StrideError::SessionExpired) => return Err(StrideError::SessionExpired),
                        Err(e) => out.error(&format!("Approval failed: {}", e)),
                    },
                    "r" | "refine" => {
                        let feedback = prompt(&term, "What should change? ")?;
                        if feedback.trim().is_empty() {
                            // Rejected locally; no network call happens
                            out.warning("Feedback must not be empty.");
                            continue;
                        }
                        match session.refine(&api, &feedback).await {
                            Ok(()) => out.success("Roadmap updated; restarting at phase 1."),
                            Err(StrideError::SessionExpired) => {
                                return Err(StrideError::SessionExpired);
                            }
                            Err(e) => out.error(&format!("Refine failed: {}", e)),
                        }
                    }
                    "b" | "back" => session.back_to_phases(),
                    "q" | "quit" => return Ok(()),
                    _ => out.warning("Unknown command."),
                }
            }
            WizardState::Done => return Ok(()),
            // Transient states only exist while a call is in flight
            WizardState::Loading | WizardState::Approving | WizardState::RefineSubmitting => {
                return Ok(());
            }
        }
    }
}

fn prompt(term: &Term, message: &str) -> Result<String> {
    term.write_str(message)?;
    Ok(term.read_line()?.trim().to_string())
}

fn confirm(term: &Term, message: &str) -> Result<bool> {
    Ok(prompt(term, message)?.eq_ignore_ascii_case("y"))
}
