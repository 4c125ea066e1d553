//! Application configuration, loaded from the environment.
//!
//! Every setting has a default; a bare `HEALTHSMART_SERVER__PORT=9000`
//! style override is enough to change one value. Nested fields use the
//! double-underscore separator.

mod ai;
mod error;
mod server;
mod session;

use serde::Deserialize;

pub use ai::AIConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use session::SessionConfig;

const ENV_PREFIX: &str = "HEALTHSMART";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AIConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Loads configuration from `HEALTHSMART_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let raw = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        let config: AppConfig = raw.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.session.validate()?;
        Ok(())
    }
}
