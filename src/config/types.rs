//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{server, wizard};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings
    pub server: ServerConfig,

    /// Roadmap review wizard tuning
    pub wizard: WizardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            wizard: WizardConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `StrideError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if url::Url::parse(&self.server.url).is_err() {
            return Err(crate::types::StrideError::config(format!(
                "server.url is not a valid URL: {}",
                self.server.url
            )));
        }

        if self.server.timeout_secs == 0 {
            return Err(crate::types::StrideError::config(
                "server.timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the AI-Scheduler backend
    pub url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Signed session cookie value issued at sign-in. Optional because the
    /// backend may run without authentication in development.
    pub session: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: server::DEFAULT_URL.to_string(),
            timeout_secs: server::DEFAULT_TIMEOUT_SECS,
            session: None,
        }
    }
}

// =============================================================================
// Wizard Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Wait before the single built-in generation retry (milliseconds)
    pub retry_delay_ms: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: wizard::DEFAULT_RETRY_DELAY_MS,
        }
    }
}
