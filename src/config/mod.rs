use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;

use crate::tenancy::mode::EnforcementMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unrecognized enforcement mode '{0}' (expected off, soft or strict)")]
    InvalidEnforcementMode(String),
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("missing configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub enforcement: EnforcementMode,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub workspace_cache: WorkspaceCacheConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceCacheConfig {
    pub ttl_secs: u64,
}

impl AppConfig {
    /// Build configuration from the process environment. Fails on
    /// unrecognized values instead of defaulting; a bad enforcement mode
    /// must abort boot rather than silently weaken isolation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let base = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        base.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = env::var("TENANCY_ENFORCEMENT") {
            self.enforcement = v
                .parse::<EnforcementMode>()
                .map_err(|_| ConfigError::InvalidEnforcementMode(v))?;
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().map_err(|_| ConfigError::InvalidValue {
                var: "DATABASE_MAX_CONNECTIONS",
                value: v,
            })?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "DATABASE_CONNECTION_TIMEOUT",
                    value: v,
                })?;
        }

        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().map_err(|_| ConfigError::InvalidValue {
                var: "JWT_EXPIRY_HOURS",
                value: v,
            })?;
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(v) = env::var("WORKSPACE_CACHE_TTL_SECS") {
            self.workspace_cache.ttl_secs = v.parse().map_err(|_| ConfigError::InvalidValue {
                var: "WORKSPACE_CACHE_TTL_SECS",
                value: v,
            })?;
        }

        if matches!(self.environment, Environment::Production) && self.security.jwt_secret.is_empty()
        {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            enforcement: EnforcementMode::Soft,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: "dev-secret".to_string(),
                jwt_expiry_hours: 24 * 7,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            workspace_cache: WorkspaceCacheConfig { ttl_secs: 60 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            enforcement: EnforcementMode::Soft,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout_secs: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                cors_origins: vec!["https://staging.worklane.app".to_string()],
            },
            workspace_cache: WorkspaceCacheConfig { ttl_secs: 60 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            enforcement: EnforcementMode::Strict,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                cors_origins: vec!["https://app.worklane.app".to_string()],
            },
            workspace_cache: WorkspaceCacheConfig { ttl_secs: 60 },
        }
    }
}

// Initialized exactly once in main(); mode changes require a restart.
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Load configuration from the environment and install it as the process
/// singleton. Returns the startup error instead of panicking so main() can
/// abort boot with a real message.
pub fn init() -> Result<&'static AppConfig, ConfigError> {
    if let Some(existing) = CONFIG.get() {
        return Ok(existing);
    }
    let config = AppConfig::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}

/// Install an explicit configuration (tests).
pub fn init_with(config: AppConfig) -> &'static AppConfig {
    CONFIG.get_or_init(|| config)
}

pub fn config() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("config::init() must run before config() is used")
}


#[cfg(test)]
impl AppConfig {
    fn with_override_mode(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.enforcement = raw
            .parse::<EnforcementMode>()
            .map_err(|_| ConfigError::InvalidEnforcementMode(raw.to_string()))?;
        Ok(self)
    }
}
