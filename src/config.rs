//! Configuration loaded from the environment

use std::path::PathBuf;

use crate::crypto::EncryptionKey;
use crate::error::{BookingError, Result};

/// Default database file when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_PATH: &str = "holisticbook.db";

/// `DATABASE_URL` value selecting the in-memory store
pub const MEMORY_DATABASE_URL: &str = ":memory:";

/// Where the storage engine lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// SQLite database file
    File(PathBuf),
    /// Private in-memory SQLite database, gone when the handle is dropped
    Memory,
}

impl DatabaseTarget {
    /// Parse a `DATABASE_URL` value
    ///
    /// Accepts `:memory:`, `sqlite::memory:`, `sqlite://<path>`, `sqlite:<path>`
    /// or a bare path.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let rest = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if rest == MEMORY_DATABASE_URL {
            return Ok(DatabaseTarget::Memory);
        }
        if rest.is_empty() {
            return Err(BookingError::ConfigError("DATABASE_URL is empty".to_string()));
        }
        Ok(DatabaseTarget::File(PathBuf::from(rest)))
    }
}

/// Data layer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage engine location (`DATABASE_URL`)
    pub database: DatabaseTarget,
    /// Client data encryption key (`ENCRYPTION_KEY`)
    pub encryption_key: EncryptionKey,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace` (`LOG_LEVEL`)
    pub log_level: String,
}

impl Config {
    /// Load configuration from `.env` and environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) => DatabaseTarget::parse(&url)?,
            None => DatabaseTarget::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
        };

        let secret = lookup("ENCRYPTION_KEY")
            .ok_or_else(|| BookingError::ConfigError("ENCRYPTION_KEY is not set".to_string()))?;
        let encryption_key = EncryptionKey::new(secret)
            .map_err(|_| BookingError::ConfigError("ENCRYPTION_KEY is empty".to_string()))?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            database,
            encryption_key,
            log_level,
        })
    }
}
