//! Runtime settings for the Focus Board server, read from the environment.

use serde::Serialize;
use std::env;
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid DATABASE_URL: {0:?}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid PORT: {0:?}")]
    InvalidPort(String),

    #[error("Unknown APP_ENV: {0:?}")]
    UnknownEnv(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment Mode
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Production,
    Test,
}

impl AppEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Production => "production",
            AppEnv::Test => "test",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            "test" => Ok(AppEnv::Test),
            _ => Err(ConfigError::UnknownEnv(s.to_string())),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Database Target
// ─────────────────────────────────────────────────────────────────────────────

/// Where the todo table lives, as parsed from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    File(PathBuf),
    Memory,
}

impl DatabaseTarget {
    /// Accepts `sqlite://path`, `sqlite:path`, a bare path, or `:memory:`.
    /// URLs naming any other scheme (`postgres://...`) are rejected.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim();
        if let Some((scheme, _)) = trimmed.split_once("://") {
            if scheme != "sqlite" {
                return Err(ConfigError::InvalidDatabaseUrl(url.to_string()));
            }
        }
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        match path {
            "" => Err(ConfigError::InvalidDatabaseUrl(url.to_string())),
            ":memory:" => Ok(DatabaseTarget::Memory),
            p => Ok(DatabaseTarget::File(PathBuf::from(p))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/focus.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub app_env: AppEnv,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        // Malformed URLs are rejected at load.
        DatabaseTarget::parse(&database_url)?;

        let app_env = match lookup("APP_ENV") {
            Some(raw) => AppEnv::parse(&raw)?,
            None => AppEnv::default(),
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            app_env,
            host,
            port,
        })
    }

    pub fn database(&self) -> Result<DatabaseTarget, ConfigError> {
        DatabaseTarget::parse(&self.database_url)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            app_env: AppEnv::default(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}
