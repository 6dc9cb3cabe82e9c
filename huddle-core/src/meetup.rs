//! Meetup types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rsvp::Rsvp;

/// A single-instant gathering (dinner, coffee, games night).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meetup {
    pub id: String,
    pub title: String,
    pub date_time: DateTime<Utc>,
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

/// Insert payload for a new meetup. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NewMeetup {
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
}

/// Update payload for an existing meetup.
#[derive(Debug, Clone, Serialize)]
pub struct MeetupPatch {
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub updated_by: String,
}
