//! # HolisticBook data layer
//!
//! Storage for a practitioner booking application: practitioners, their
//! availability and client bookings, kept in SQLite.
//!
//! ## Features
//!
//! - Client data on bookings is encrypted before it is written
//!   (AES-256-CBC, OpenSSL salted envelope, base64)
//! - Structured values stored as JSON text
//! - Foreign keys and unique constraints enforced by the storage engine
//! - Configuration from the environment, `tracing` diagnostics
//!
//! ## Example
//!
//! ```no_run
//! use holisticbook::{BookingService, Database, EncryptionKey, NewPractitioner};
//! use serde_json::json;
//!
//! let db = Database::open_in_memory().unwrap();
//! let service = BookingService::new(db, EncryptionKey::new("change-me").unwrap());
//!
//! let iris = service.insert_practitioner(&NewPractitioner::new("Iris", "iris@example.com")).unwrap();
//! let booking = service.insert_booking(iris.id, &json!({"name": "Alice"})).unwrap();
//! assert_eq!(booking.status, "pending");
//! ```

pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod logging;
pub mod service;
pub mod utils;

// Re-export main types
pub use config::{Config, DatabaseTarget};
pub use crypto::{decrypt_value, encrypt_value, EncryptionKey, FieldCipher};
pub use database::models::{Availability, Booking, NewAvailability, NewPractitioner, Practitioner};
pub use database::Database;
pub use error::{BookingError, Result};
pub use service::BookingService;

/// Status given to every new booking
pub const DEFAULT_BOOKING_STATUS: &str = "pending";
