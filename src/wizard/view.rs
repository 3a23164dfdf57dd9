//! Wizard rendering.
//!
//! Pure presentation: turns session state into styled terminal lines. No
//! state mutation happens here.

use console::style;

use crate::types::{Goal, StrideError};

use super::WizardSession;

/// Goal header shown above every wizard screen. `None` leaves the title
/// area blank (metadata fetch failures are log-only).
pub fn render_header(goal: Option<&Goal>) {
    println!();
    match goal {
        Some(goal) => {
            println!("{}", style(&goal.title).bold().underlined());
            if let Some(target) = goal.target_date {
                println!("{}", style(format!("Target: {}", target.format("%Y-%m-%d"))).dim());
            }
        }
        None => println!("{}", style("Roadmap review").bold().underlined()),
    }
}

/// One phase page with its position in the sequence.
pub fn render_phase(session: &WizardSession) {
    let Some(phase) = session.current_phase() else {
        return;
    };
    let position = session.current_index() + 1;
    let total = session.phases().len();

    println!();
    println!(
        "{}  {}",
        style(format!("[{}/{}]", position, total)).cyan(),
        style(&phase.title).bold()
    );
    if !phase.timeline.is_empty() {
        println!("  {}", style(&phase.timeline).dim());
    }
    if !phase.goal.is_empty() {
        println!("  {}", phase.goal);
    }
    if !phase.tasks.is_empty() {
        println!("  {}", style("Tasks").bold());
        for task in &phase.tasks {
            println!("    • {}", task);
        }
    }
    if !phase.success_criteria.is_empty() {
        println!("  {}", style("Success criteria").bold());
        for criterion in &phase.success_criteria {
            println!("    ✓ {}", criterion);
        }
    }
}

/// Final review summary: every phase title plus the terminal choices.
pub fn render_final_review(session: &WizardSession) {
    println!();
    println!("{}", style("Final review").bold());
    println!("{}", "─".repeat(40));
    for (index, phase) in session.phases().iter().enumerate() {
        println!("  {}. {}", index + 1, phase.title);
    }
    println!();
    println!(
        "Approving creates tasks and milestones from these {} phase(s).",
        session.phases().len()
    );
}

/// Persistent resolution-failure panel. Unlike action errors this one stays
/// until the user retries or leaves.
pub fn render_resolution_error(error: &StrideError) {
    println!();
    println!("{}", style("Roadmap unavailable").red().bold());
    println!("{}", "─".repeat(40));
    println!("  {}", error);
}

/// Control hints for the phase navigator.
pub fn render_phase_controls() {
    println!();
    println!(
        "{}",
        style("[n]ext  [p]rev  [1-9] jump  [q]uit").dim()
    );
}

/// Control hints for the final review screen.
pub fn render_final_controls() {
    println!(
        "{}",
        style("[a]pprove  [r]equest changes  [b]ack to phases  [q]uit").dim()
    );
}
