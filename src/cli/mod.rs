//! Terminal interface: command implementations and output helpers.

pub mod commands;
pub mod output;

pub use output::Output;
