//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{ConfigError, ConversationConfig, RegistryConfig};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    /// Reference data and session storage
    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Live conversation registry limits
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_persistence()?;
        self.validate_conversation()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_strict() && !self.server.cors_enabled {
            return Err(ConfigError::InvalidValue {
                field: "server.cors_enabled".to_string(),
                message: format!("CORS cannot be disabled in {:?}", self.environment),
            });
        }

        Ok(())
    }

    fn validate_persistence(&self) -> Result<(), ConfigError> {
        let persistence = &self.persistence;

        if persistence.backend == PersistenceBackend::Sqlite {
            if !persistence.database_url.starts_with("sqlite:") {
                return Err(ConfigError::InvalidValue {
                    field: "persistence.database_url".to_string(),
                    message: format!(
                        "Expected a sqlite: URL, got {}",
                        persistence.database_url
                    ),
                });
            }

            if persistence.max_connections == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "persistence.max_connections".to_string(),
                    message: "Must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_conversation(&self) -> Result<(), ConfigError> {
        let conversation = &self.conversation;

        if !(1..=5).contains(&conversation.voice_yoga_min_intensity) {
            return Err(ConfigError::InvalidValue {
                field: "conversation.voice_yoga_min_intensity".to_string(),
                message: format!(
                    "Must be between 1 and 5, got {}",
                    conversation.voice_yoga_min_intensity
                ),
            });
        }

        if conversation.memory_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "conversation.memory_size".to_string(),
                message: "Must keep at least one entry".to_string(),
            });
        }

        if self.registry.max_conversations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registry.max_conversations".to_string(),
                message: "Must allow at least one conversation".to_string(),
            });
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceBackend {
    /// Process-local maps, lost on restart
    Memory,
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub backend: PersistenceBackend,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Replace the asana/sequence catalog at startup
    #[serde(default)]
    pub seed_on_startup: bool,
}

fn default_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://yoga_app.db".to_string())
}
fn default_max_connections() -> u32 {
    5
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: PersistenceBackend::default(),
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            seed_on_startup: false,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` relative to the working directory
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::from(dir.join("default")).required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("YOGA_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        backend = ?settings.persistence.backend,
        "Settings loaded"
    );

    Ok(settings)
}
