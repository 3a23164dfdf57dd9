//! CLI command implementations.

pub mod goal;
pub mod review;
pub mod stats;
pub mod task;
pub mod today;
