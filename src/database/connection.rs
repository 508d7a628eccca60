//! Database connection management

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use super::schema;
use crate::config::DatabaseTarget;
use crate::error::{BookingError, Result};

/// Database connection wrapper
///
/// Every handle enforces foreign keys and has the schema in place.
pub struct Database {
    /// Path to the database file, `None` for in-memory stores
    path: Option<PathBuf>,
    /// SQLite connection
    conn: Option<Connection>,
}

impl Database {
    /// Open (or create) a database file at the specified path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened database file");
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        info!("opened in-memory database");
        Self::init(conn, None)
    }

    /// Open whichever store the configuration points at
    pub fn open_target(target: &DatabaseTarget) -> Result<Self> {
        match target {
            DatabaseTarget::File(path) => Self::open(path),
            DatabaseTarget::Memory => Self::open_in_memory(),
        }
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;

        // Reading the schema surfaces "file is not a database" here instead
        // of on the first real query.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))?;

        for sql in schema::CREATE_ALL_TABLES {
            conn.execute(sql, [])?;
        }
        debug!(tables = schema::CREATE_ALL_TABLES.len(), "schema ready");

        Ok(Self { path, conn: Some(conn) })
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            BookingError::ConnectionError("Database not open".to_string())
        })
    }

    /// Get the database path (`None` for in-memory)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the database connection
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            debug!("closed database");
        }
    }

    /// Check if database is open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Check whether foreign key enforcement is active
    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        let enabled: i64 = self
            .connection()?
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(enabled == 1)
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.is_open());
        assert!(db.path().is_none());
        assert!(db.foreign_keys_enabled().unwrap());
    }

    #[test]
    fn test_open_creates_tables() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.path(), Some(db_path.as_path()));

        let count: i64 = db.connection().unwrap().query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('practitioners', 'availability', 'bookings')",
            [],
            |row| row.get(0),
        ).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open(&db_path).unwrap();
            db.connection().unwrap().execute(
                "INSERT INTO practitioners (name, email) VALUES ('Iris', 'iris@example.com')",
                [],
            ).unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        let count: i64 = db.connection().unwrap()
            .query_row("SELECT COUNT(*) FROM practitioners", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_target() {
        let db = Database::open_target(&DatabaseTarget::Memory).unwrap();
        assert!(db.path().is_none());

        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("target.db");
        let db = Database::open_target(&DatabaseTarget::File(db_path.clone())).unwrap();
        assert_eq!(db.path(), Some(db_path.as_path()));
    }

    #[test]
    fn test_open_missing_directory_is_connection_error() {
        let result = Database::open(Path::new("/nonexistent/dir/holisticbook.db"));
        assert!(matches!(result, Err(BookingError::ConnectionError(_))));
    }

    #[test]
    fn test_open_non_database_file_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("garbage.db");
        std::fs::write(&db_path, vec![0x42u8; 4096]).unwrap();

        let result = Database::open(&db_path);
        assert!(matches!(result, Err(BookingError::ConnectionError(_))));
    }

    #[test]
    fn test_closed_database() {
        let mut db = Database::open_in_memory().unwrap();
        db.close();
        assert!(!db.is_open());
        assert!(matches!(db.connection(), Err(BookingError::ConnectionError(_))));
    }
}
