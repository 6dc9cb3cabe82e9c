//! Trip types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::rsvp::Rsvp;

/// A multi-day trip. Dates are whole days, no times.
///
/// `end_date >= start_date` is enforced at the input layer
/// ([`crate::input::TripInput::validate`]), not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Nested RSVPs, joined in by the fetch query.
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
}

/// Insert payload for a new trip.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrip {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
}

/// Update payload for an existing trip.
#[derive(Debug, Clone, Serialize)]
pub struct TripPatch {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub updated_by: String,
}
