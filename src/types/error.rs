//! Unified Error Type System
//!
//! Single error enum for the entire client.
//!
//! ## Design Principles
//!
//! - One unified error type (StrideError) with a crate-wide Result alias
//! - Session expiry is its own variant so any in-flight flow can
//!   short-circuit on it
//! - Server failures keep the status code and the server's own message
//! - No panic/unwrap - all errors are recoverable

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrideError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    /// The backend rejected the session cookie. Every flow aborts on this.
    #[error("Session expired: sign in again and update [server].session in your config")]
    SessionExpired,

    /// Non-success response with the server's own message (FastAPI `detail`
    /// when present, raw body otherwise).
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Roadmap could not be loaded or generated, after the one built-in
    /// generation retry. Terminal for the wizard until the user retries.
    #[error("Could not load or generate a roadmap: {0}")]
    RoadmapResolution(String),

    /// Approve/refine called before a roadmap was resolved.
    #[error("No resolved roadmap in this session")]
    NoRoadmap,

    /// Refine feedback rejected locally, before any network call.
    #[error("Feedback must not be empty")]
    EmptyFeedback,
}

pub type Result<T> = std::result::Result<T, StrideError>;

impl StrideError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a server error from a status code and extracted message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check whether this error is the session-expiry signal. Callers use
    /// this to abort whatever flow is in progress instead of recovering.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = StrideError::api(404, "Goal not found");
        assert_eq!(err.to_string(), "Server error (404): Goal not found");
    }

    #[test]
    fn test_session_expired_detection() {
        assert!(StrideError::SessionExpired.is_session_expired());
        assert!(!StrideError::api(500, "boom").is_session_expired());
        assert!(!StrideError::NoRoadmap.is_session_expired());
    }
}
