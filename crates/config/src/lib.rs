//! Configuration management for the yoga mood agent
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (YOGA_AGENT__ prefix, `__` separator)

pub mod conversation;
pub mod settings;

pub use conversation::{ConversationConfig, RegistryConfig, VoiceResponder};
pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, PersistenceBackend,
    PersistenceConfig, RuntimeEnvironment, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
