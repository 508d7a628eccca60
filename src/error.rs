//! Error types for the HolisticBook data layer

use rusqlite::ErrorCode;
use thiserror::Error;

/// Main error type for storage and codec operations
#[derive(Error, Debug)]
pub enum BookingError {
    /// Ciphertext could not be decrypted (wrong key, corrupted or truncated data)
    #[error("Decryption error: {0}")]
    DecryptionError(String),

    /// Decrypted or stored content is not valid serialized structured data
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Encryption failed
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    /// Storage engine rejected a write (foreign key, unique, not null)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Storage engine could not be reached or opened
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Any other storage engine failure
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<rusqlite::Error> for BookingError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => {
                BookingError::ConstraintViolation(err.to_string())
            }
            Some(ErrorCode::CannotOpen) | Some(ErrorCode::NotADatabase) => {
                BookingError::ConnectionError(err.to_string())
            }
            _ => BookingError::DatabaseError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::MalformedPayload(err.to_string())
    }
}

/// Result type alias for data layer operations
pub type Result<T> = std::result::Result<T, BookingError>;
