//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/stride/config.toml)
//! 3. Environment variables (STRIDE_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{Result, StrideError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge environment variables. Double underscore separates nesting
        // levels so snake_case fields stay addressable:
        // STRIDE_SERVER__URL -> server.url,
        // STRIDE_SERVER__TIMEOUT_SECS -> server.timeout_secs
        figment = figment.merge(Env::prefixed("STRIDE_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| StrideError::config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| StrideError::config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/stride/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("stride"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file path
    pub fn show_path() {
        println!("Configuration paths:");
        match Self::global_config_path() {
            Some(path) => {
                let marker = if path.exists() { "" } else { " (not created)" };
                println!("  Global: {}{}", path.display(), marker);
            }
            None => println!("  Global: <no home directory resolved>"),
        }
        println!("  Environment: STRIDE_* variables override file values");
        println!("               (double underscore nests, e.g. STRIDE_SERVER__URL)");
    }

    /// Show merged configuration as TOML
    pub fn show() -> Result<()> {
        let config = Self::load()?;
        let rendered = toml::to_string_pretty(&config)
            .map_err(|e| StrideError::config(format!("Failed to render config: {}", e)))?;
        println!("{}", rendered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[server]\nurl = \"http://scheduler.internal:9000\"\n\n[wizard]\nretry_delay_ms = 100"
        )
        .expect("write config");

        let config = ConfigLoader::load_from_file(file.path()).expect("load");
        assert_eq!(config.server.url, "http://scheduler.internal:9000");
        assert_eq!(config.wizard.retry_delay_ms, 100);
        // Untouched values keep their defaults
        assert_eq!(
            config.server.timeout_secs,
            crate::constants::server::DEFAULT_TIMEOUT_SECS
        );
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[server]\ntimeout_secs = 0").expect("write config");

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides_snake_case_fields() {
        figment::Jail::expect_with(|jail| {
            // Isolate from any real global config
            jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
            jail.set_env("STRIDE_SERVER__TIMEOUT_SECS", "5");
            jail.set_env("STRIDE_WIZARD__RETRY_DELAY_MS", "10");

            let config = ConfigLoader::load().expect("load with env overrides");
            assert_eq!(config.server.timeout_secs, 5);
            assert_eq!(config.wizard.retry_delay_ms, 10);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ConfigLoader::load_from_file(Path::new("/nonexistent/config.toml"))
            .expect("defaults when file is absent");
        assert_eq!(config.server.url, crate::constants::server::DEFAULT_URL);
    }
}
