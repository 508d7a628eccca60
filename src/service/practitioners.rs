//! Practitioner operations

use tracing::{debug, info};

use super::booking_service::BookingService;
use crate::database::{NewPractitioner, Practitioner, queries};
use crate::error::Result;

impl BookingService {
    /// List all practitioners
    ///
    /// No pagination and no ordering beyond the storage engine's default.
    pub fn list_practitioners(&self) -> Result<Vec<Practitioner>> {
        let raw = queries::get_all_practitioners_raw(self.conn()?)?;
        debug!(count = raw.len(), "listed practitioners");
        raw.into_iter().map(Practitioner::try_from).collect()
    }

    /// Insert a practitioner and return the stored record
    pub fn insert_practitioner(&self, new: &NewPractitioner) -> Result<Practitioner> {
        let settings = queries::to_json_column(new.settings.as_ref())?;
        let raw = queries::insert_practitioner(self.conn()?, &new.name, &new.email, settings.as_deref())?;
        info!(practitioner_id = raw.id, "inserted practitioner");
        Practitioner::try_from(raw)
    }
}
