//! Configuration module for SSIS.

use serde::Deserialize;
use std::path::Path;

use crate::auth::validation::{validate_email, validate_password, validate_username};
use crate::{Result, SsisError};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/ssis.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// JWT secret key.
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_token_expiry_secs: u64,
    /// Rate limit for the login endpoint (requests per minute per client).
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit: u32,
    /// Key the login throttle on `X-Forwarded-For`/`X-Real-IP`.
    /// Enable only behind a reverse proxy that overwrites them.
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

fn default_web_host() -> String {
    "127.0.0.1".to_string()
}

fn default_web_port() -> u16 {
    5000
}

fn default_jwt_access_expiry() -> u64 {
    300 // 5 minutes
}

fn default_login_rate_limit() -> u32 {
    5
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            jwt_secret: String::new(),
            jwt_access_token_expiry_secs: default_jwt_access_expiry(),
            login_rate_limit: default_login_rate_limit(),
            trust_proxy_headers: false,
        }
    }
}

/// Initial account created when the users table is empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Username of the initial account.
    #[serde(default)]
    pub username: Option<String>,
    /// Email of the initial account.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password; prefer `SSIS_ADMIN_PASSWORD`.
    #[serde(default)]
    pub password: Option<String>,
}

impl AdminConfig {
    /// Returns the bootstrap credentials when all three values are set.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.username, &self.email, &self.password) {
            (Some(u), Some(e), Some(p)) if !u.is_empty() && !e.is_empty() && !p.is_empty() => {
                Some((u, e, p))
            }
            _ => None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Bootstrap account.
    #[serde(default)]
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SsisError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SsisError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SSIS_JWT_SECRET`: token signing secret
    /// - `SSIS_DATABASE_PATH`: database file
    /// - `SSIS_ADMIN_PASSWORD`: password of the bootstrap account
    pub fn apply_env_overrides(&mut self) {
        if let Some(secret) = non_empty_env("SSIS_JWT_SECRET") {
            self.web.jwt_secret = secret;
        }
        if let Some(path) = non_empty_env("SSIS_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(password) = non_empty_env("SSIS_ADMIN_PASSWORD") {
            self.admin.password = Some(password);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.web.jwt_secret.is_empty() {
            return Err(SsisError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the SSIS_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.web.jwt_access_token_expiry_secs == 0 {
            return Err(SsisError::Config(
                "jwt_access_token_expiry_secs must be greater than zero".to_string(),
            ));
        }
        if let Some((username, email, password)) = self.admin.credentials() {
            validate_username(username)
                .and_then(|_| validate_email(email))
                .and_then(|_| validate_password(password))
                .map_err(|e| SsisError::Config(format!("[admin] {e}")))?;
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
