//! Availability operations

use serde_json::Value;
use tracing::{debug, info};

use super::booking_service::BookingService;
use crate::database::{Availability, NewAvailability, queries};
use crate::error::Result;

impl BookingService {
    /// Publish availability slots for a practitioner
    ///
    /// An unknown practitioner is rejected by the storage engine.
    pub fn insert_availability(&self, new: &NewAvailability) -> Result<Availability> {
        let slots = queries::to_json_column(new.slots.as_ref())?;
        let raw = queries::insert_availability(self.conn()?, new.practitioner_id, slots.as_deref())?;
        info!(availability_id = raw.id, practitioner_id = raw.practitioner_id, "inserted availability");
        Availability::try_from(raw)
    }

    /// List availability rows for a practitioner, oldest first
    pub fn list_availability(&self, practitioner_id: i64) -> Result<Vec<Availability>> {
        let raw = queries::get_availability_raw(self.conn()?, practitioner_id)?;
        debug!(practitioner_id, count = raw.len(), "listed availability");
        raw.into_iter().map(Availability::try_from).collect()
    }

    /// Shorthand for [`BookingService::insert_availability`]
    pub fn add_slots(&self, practitioner_id: i64, slots: Value) -> Result<Availability> {
        self.insert_availability(&NewAvailability {
            practitioner_id,
            slots: Some(slots),
        })
    }
}
