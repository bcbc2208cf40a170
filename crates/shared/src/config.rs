//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Teller session token configuration.
    pub session: SessionConfig,
    /// Supervisor approval configuration.
    pub approval: ApprovalConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Teller session token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret key for verifying teller session tokens.
    pub secret: String,
}

/// Supervisor approval configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalConfig {
    /// Secret key for signing approval tokens.
    pub secret: String,
    /// Amount at or above which supervisor approval is required.
    #[serde(default = "default_approval_threshold_cents")]
    pub threshold_cents: i64,
    /// Approval token expiration in minutes.
    #[serde(default = "default_token_expires_minutes")]
    pub token_expires_minutes: i64,
}

fn default_approval_threshold_cents() -> i64 {
    100_000 // $1,000.00
}

fn default_token_expires_minutes() -> i64 {
    15
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TELLERPOINT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
