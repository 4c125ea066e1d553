//! Session lifecycle settings.

use std::path::PathBuf;

use serde::Deserialize;

use super::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle seconds before a session is considered abandoned.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: i64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Optional catalog file; the builtin catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_idle_timeout_secs() -> i64 {
    1800
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            catalog_path: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_timeout_secs <= 0 {
            return Err(ConfigError::Invalid(
                "session.idle_timeout_secs must be positive".into(),
            ));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "session.sweep_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_idle_timeout_is_rejected() {
        let config = SessionConfig {
            idle_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
