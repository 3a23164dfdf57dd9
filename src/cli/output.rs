//! Status-line output helpers.
//!
//! Action errors print and leave the flow recoverable; the persistent
//! resolution panel lives in the wizard's view module instead.

use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    /// Recoverable failure line. Printed to stderr so piped output stays clean.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("·").dim(), message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
