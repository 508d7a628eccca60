//! Booking operations
//!
//! Client data is sealed with the service's [`FieldCipher`](crate::crypto::FieldCipher)
//! before the row reaches the storage engine. Plaintext client data is
//! never logged.

use serde_json::Value;
use tracing::{debug, info};

use super::booking_service::BookingService;
use crate::database::{Booking, queries};
use crate::error::Result;
use crate::DEFAULT_BOOKING_STATUS;

impl BookingService {
    /// Insert a booking for `practitioner_id` with encrypted `client_data`
    ///
    /// The status is always "pending". Foreign key existence is left to the
    /// storage engine, which reports it as `ConstraintViolation`.
    pub fn insert_booking(&self, practitioner_id: i64, client_data: &Value) -> Result<Booking> {
        self.insert_booking_with_intake(practitioner_id, client_data, None)
    }

    /// Insert a booking that also carries intake form responses
    pub fn insert_booking_with_intake(
        &self,
        practitioner_id: i64,
        client_data: &Value,
        intake_responses: Option<&Value>,
    ) -> Result<Booking> {
        let client_info = self.cipher.encrypt(client_data)?;
        let intake = queries::to_json_column(intake_responses)?;

        let raw = queries::insert_booking(
            self.conn()?,
            practitioner_id,
            &client_info,
            DEFAULT_BOOKING_STATUS,
            intake.as_deref(),
        )?;
        info!(booking_id = raw.id, practitioner_id, "inserted booking");

        Booking::try_from(raw)
    }

    /// Get a booking by ID, with `client_info` still encrypted
    pub fn get_booking(&self, id: i64) -> Result<Option<Booking>> {
        let raw = queries::get_booking_raw(self.conn()?, id)?;
        debug!(booking_id = id, found = raw.is_some(), "fetched booking");
        raw.map(Booking::try_from).transpose()
    }

    /// List bookings for a practitioner, oldest first
    pub fn list_bookings(&self, practitioner_id: i64) -> Result<Vec<Booking>> {
        let raw = queries::get_bookings_by_practitioner_raw(self.conn()?, practitioner_id)?;
        debug!(practitioner_id, count = raw.len(), "listed bookings");
        raw.into_iter().map(Booking::try_from).collect()
    }

    /// Decrypt the client data of a booking
    pub fn decrypt_client_info(&self, booking: &Booking) -> Result<Value> {
        self.cipher.decrypt(&booking.client_info)
    }
}
