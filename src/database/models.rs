//! Data models for practitioner, availability and booking records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Practitioner offering bookable sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    /// Auto-assigned row ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unique contact email
    pub email: String,
    /// Free-form practitioner settings
    pub settings: Option<Value>,
}

/// Fields for a new practitioner row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPractitioner {
    pub name: String,
    pub email: String,
    pub settings: Option<Value>,
}

impl NewPractitioner {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Availability slots published by a practitioner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub id: i64,
    pub practitioner_id: i64,
    pub slots: Option<Value>,
}

/// Fields for a new availability row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAvailability {
    pub practitioner_id: i64,
    pub slots: Option<Value>,
}

/// Booking as stored
///
/// `client_info` is the encrypted envelope, never plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Auto-assigned row ID
    pub id: i64,
    /// Booked practitioner
    pub practitioner_id: i64,
    /// Encrypted client data
    pub client_info: String,
    /// Booking status, "pending" when created
    pub status: String,
    /// Answers to the practitioner's intake form
    pub intake_responses: Option<Value>,
    /// Creation timestamp assigned by the storage engine
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Check if the booking still has the initial status
    pub fn is_pending(&self) -> bool {
        self.status == crate::DEFAULT_BOOKING_STATUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_practitioner_builder() {
        let p = NewPractitioner::new("Dr. Iris", "iris@example.com");
        assert_eq!(p.name, "Dr. Iris");
        assert!(p.settings.is_none());

        let p = p.with_settings(json!({"timezone": "Europe/Amsterdam"}));
        assert_eq!(p.settings.unwrap()["timezone"], "Europe/Amsterdam");
    }

    #[test]
    fn test_booking_is_pending() {
        let mut booking = Booking {
            id: 1,
            practitioner_id: 1,
            client_info: "U2FsdGVkX1...".to_string(),
            status: "pending".to_string(),
            intake_responses: None,
            created_at: Utc::now(),
        };
        assert!(booking.is_pending());

        booking.status = "confirmed".to_string();
        assert!(!booking.is_pending());
    }

    #[test]
    fn test_booking_serializes_ciphertext_only() {
        let booking = Booking {
            id: 7,
            practitioner_id: 2,
            client_info: "U2FsdGVkX18BAgMEBQYHCKgkxY96".to_string(),
            status: "pending".to_string(),
            intake_responses: Some(json!({"q1": "yes"})),
            created_at: Utc::now(),
        };
        let text = serde_json::to_string(&booking).unwrap();
        assert!(text.contains("\"client_info\":\"U2FsdGVkX18BAgMEBQYHCKgkxY96\""));
    }
}
