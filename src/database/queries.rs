//! SQL query operations for database access
//!
//! Low-level, row-shaped functions. Structured values travel as JSON text
//! here; conversion into models happens in the `TryFrom` impls at the
//! bottom. For the typed API, use `BookingService`.

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde_json::Value;

use super::models::{Availability, Booking, Practitioner};
use crate::error::{BookingError, Result};
use crate::utils::parse_timestamp;

// ============================================================================
// Practitioners queries
// ============================================================================

/// Get all practitioners
pub fn get_all_practitioners_raw(conn: &Connection) -> Result<Vec<RawPractitioner>> {
    let mut stmt = conn.prepare("SELECT id, name, email, settings FROM practitioners")?;

    let rows = stmt.query_map([], RawPractitioner::from_row)?;

    rows.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Insert a practitioner and return the stored row
pub fn insert_practitioner(
    conn: &Connection,
    name: &str,
    email: &str,
    settings_json: Option<&str>,
) -> Result<RawPractitioner> {
    let row = conn.query_row(
        "INSERT INTO practitioners (name, email, settings) VALUES (?, ?, ?)
         RETURNING id, name, email, settings",
        params![name, email, settings_json],
        RawPractitioner::from_row,
    )?;
    Ok(row)
}

// ============================================================================
// Availability queries
// ============================================================================

/// Insert an availability row and return the stored row
pub fn insert_availability(
    conn: &Connection,
    practitioner_id: i64,
    slots_json: Option<&str>,
) -> Result<RawAvailability> {
    let row = conn.query_row(
        "INSERT INTO availability (practitioner_id, slots) VALUES (?, ?)
         RETURNING id, practitioner_id, slots",
        params![practitioner_id, slots_json],
        RawAvailability::from_row,
    )?;
    Ok(row)
}

/// Get all availability rows of one practitioner
pub fn get_availability_raw(conn: &Connection, practitioner_id: i64) -> Result<Vec<RawAvailability>> {
    let mut stmt = conn.prepare(
        "SELECT id, practitioner_id, slots FROM availability WHERE practitioner_id = ? ORDER BY id"
    )?;

    let rows = stmt.query_map(params![practitioner_id], RawAvailability::from_row)?;

    rows.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

// ============================================================================
// Bookings queries
// ============================================================================

/// Insert a booking and return the stored row
///
/// `client_info` must already be ciphertext.
pub fn insert_booking(
    conn: &Connection,
    practitioner_id: i64,
    client_info: &str,
    status: &str,
    intake_responses_json: Option<&str>,
) -> Result<RawBooking> {
    let row = conn.query_row(
        "INSERT INTO bookings (practitioner_id, client_info, status, intake_responses)
         VALUES (?, ?, ?, ?)
         RETURNING id, practitioner_id, client_info, status, intake_responses, created_at",
        params![practitioner_id, client_info, status, intake_responses_json],
        RawBooking::from_row,
    )?;
    Ok(row)
}

/// Get one booking by ID
pub fn get_booking_raw(conn: &Connection, id: i64) -> Result<Option<RawBooking>> {
    let row = conn
        .query_row(
            "SELECT id, practitioner_id, client_info, status, intake_responses, created_at
             FROM bookings WHERE id = ?",
            params![id],
            RawBooking::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Get all bookings of one practitioner, oldest first
pub fn get_bookings_by_practitioner_raw(conn: &Connection, practitioner_id: i64) -> Result<Vec<RawBooking>> {
    let mut stmt = conn.prepare(
        "SELECT id, practitioner_id, client_info, status, intake_responses, created_at
         FROM bookings WHERE practitioner_id = ? ORDER BY id"
    )?;

    let rows = stmt.query_map(params![practitioner_id], RawBooking::from_row)?;

    rows.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

// ============================================================================
// Raw row types
// ============================================================================

/// Raw practitioner row
#[derive(Debug, Clone)]
pub struct RawPractitioner {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Settings as JSON text
    pub settings: Option<String>,
}

impl RawPractitioner {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            settings: row.get(3)?,
        })
    }
}

/// Raw availability row
#[derive(Debug, Clone)]
pub struct RawAvailability {
    pub id: i64,
    pub practitioner_id: i64,
    /// Slots as JSON text
    pub slots: Option<String>,
}

impl RawAvailability {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            practitioner_id: row.get(1)?,
            slots: row.get(2)?,
        })
    }
}

/// Raw booking row
#[derive(Debug, Clone)]
pub struct RawBooking {
    pub id: i64,
    pub practitioner_id: i64,
    /// Encrypted client data envelope
    pub client_info: String,
    pub status: String,
    /// Intake responses as JSON text
    pub intake_responses: Option<String>,
    /// `CURRENT_TIMESTAMP` text
    pub created_at: String,
}

impl RawBooking {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            practitioner_id: row.get(1)?,
            client_info: row.get(2)?,
            status: row.get(3)?,
            intake_responses: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

/// Serialize an optional structured value for a JSON column
pub fn to_json_column(value: Option<&Value>) -> Result<Option<String>> {
    Ok(value.map(serde_json::to_string).transpose()?)
}

/// Parse an optional JSON column
pub fn from_json_column(text: Option<&str>) -> Result<Option<Value>> {
    Ok(text.map(serde_json::from_str).transpose()?)
}

impl TryFrom<RawPractitioner> for Practitioner {
    type Error = BookingError;

    fn try_from(raw: RawPractitioner) -> Result<Self> {
        Ok(Practitioner {
            settings: from_json_column(raw.settings.as_deref())?,
            id: raw.id,
            name: raw.name,
            email: raw.email,
        })
    }
}

impl TryFrom<RawAvailability> for Availability {
    type Error = BookingError;

    fn try_from(raw: RawAvailability) -> Result<Self> {
        Ok(Availability {
            slots: from_json_column(raw.slots.as_deref())?,
            id: raw.id,
            practitioner_id: raw.practitioner_id,
        })
    }
}

impl TryFrom<RawBooking> for Booking {
    type Error = BookingError;

    fn try_from(raw: RawBooking) -> Result<Self> {
        let created_at = parse_timestamp(&raw.created_at).ok_or_else(|| {
            BookingError::MalformedPayload(format!("Invalid created_at: {}", raw.created_at))
        })?;

        Ok(Booking {
            intake_responses: from_json_column(raw.intake_responses.as_deref())?,
            id: raw.id,
            practitioner_id: raw.practitioner_id,
            client_info: raw.client_info,
            status: raw.status,
            created_at,
        })
    }
}
