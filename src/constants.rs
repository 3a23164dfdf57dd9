//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Roadmap review wizard constants
pub mod wizard {
    /// Maximum number of roadmap phases kept for review; longer sequences
    /// are truncated to the first entries, not rejected
    pub const MAX_PHASES: usize = 10;

    /// Default wait before the single built-in generation retry (milliseconds)
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 2500;

    /// Title of the fallback phase shown when no structured phases decode
    pub const FALLBACK_TITLE: &str = "Roadmap";
}

/// Backend connection constants
pub mod server {
    /// Default AI-Scheduler base URL
    pub const DEFAULT_URL: &str = "http://localhost:8000";

    /// Default per-request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Session cookie name issued by the backend
    pub const SESSION_COOKIE: &str = "session";
}
