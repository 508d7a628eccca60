//! Database layer
//!
//! Handles SQLite storage including:
//! - Schema creation with foreign key enforcement
//! - Row-level insert and select queries
//! - Models for practitioners, availability and bookings

pub mod models;
pub mod schema;
pub mod connection;
pub mod queries;

pub use connection::Database;
pub use models::*;
