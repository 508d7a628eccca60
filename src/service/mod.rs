//! Data access service
//!
//! `BookingService` is the typed surface over the storage engine. Client
//! data is encrypted before any booking row is written.

pub mod booking_service;
pub mod practitioners;
pub mod availability;
pub mod bookings;

pub use booking_service::BookingService;
