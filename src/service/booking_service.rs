//! Service construction and shared plumbing

use rusqlite::Connection;
use tracing::info;

use crate::config::Config;
use crate::crypto::{EncryptionKey, FieldCipher};
use crate::database::Database;
use crate::error::Result;

/// Typed data access over one database handle and one encryption key
///
/// Both are fixed for the lifetime of the service.
pub struct BookingService {
    /// Storage engine handle
    pub(crate) db: Database,
    /// Cipher for `bookings.client_info`
    pub(crate) cipher: FieldCipher,
}

impl BookingService {
    /// Create a service from an open database and the client data key
    pub fn new(db: Database, key: EncryptionKey) -> Self {
        Self {
            db,
            cipher: FieldCipher::new(key),
        }
    }

    /// Open the configured database and build a service on it
    pub fn from_config(config: &Config) -> Result<Self> {
        let db = Database::open_target(&config.database)?;
        info!(target_db = ?config.database, "booking service ready");
        Ok(Self::new(db, config.encryption_key.clone()))
    }

    /// Get a reference to the underlying database
    pub fn database(&self) -> &Database {
        &self.db
    }

    pub(crate) fn conn(&self) -> Result<&Connection> {
        self.db.connection()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::DatabaseTarget;

    pub const TEST_KEY: &str = "holistic-secret";

    pub fn create_test_service() -> BookingService {
        let db = Database::open_in_memory().unwrap();
        BookingService::new(db, EncryptionKey::new(TEST_KEY).unwrap())
    }

    #[test]
    fn test_new_service() {
        let service = create_test_service();
        assert!(service.database().is_open());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            database: DatabaseTarget::Memory,
            encryption_key: EncryptionKey::new(TEST_KEY).unwrap(),
            log_level: "info".to_string(),
        };
        let service = BookingService::from_config(&config).unwrap();
        assert!(service.database().path().is_none());
        assert!(service.database().foreign_keys_enabled().unwrap());
    }
}
