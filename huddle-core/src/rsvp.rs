//! RSVP types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A member's response to a meetup or trip.
///
/// RSVPs always live nested inside their event's `rsvps` list; the
/// polymorphic foreign key of the remote store's `rsvps` table never
/// appears on this type. See [`EventRef`] for the client-side key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsvp {
    #[serde(default)]
    pub id: String,
    pub member_id: String,
    pub status: RsvpStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Three-state RSVP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Going,
    Maybe,
    Cant,
}

impl RsvpStatus {
    /// Parse a user-facing status word ("going", "maybe", "cant"/"can't").
    pub fn parse(s: &str) -> Option<RsvpStatus> {
        match s.to_lowercase().as_str() {
            "going" => Some(RsvpStatus::Going),
            "maybe" => Some(RsvpStatus::Maybe),
            "cant" | "can't" => Some(RsvpStatus::Cant),
            _ => None,
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsvpStatus::Going => write!(f, "going"),
            RsvpStatus::Maybe => write!(f, "maybe"),
            RsvpStatus::Cant => write!(f, "can't"),
        }
    }
}

/// Reference to an event that can carry RSVPs.
///
/// The remote store models this as two nullable columns (`meetup_id`,
/// `trip_id`) of which exactly one is set; the tagged union makes the
/// "both" and "neither" states unrepresentable in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRef {
    Meetup(String),
    Trip(String),
}

impl EventRef {
    pub fn id(&self) -> &str {
        match self {
            EventRef::Meetup(id) | EventRef::Trip(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RsvpStatus::Going).unwrap(), "\"going\"");
        assert_eq!(serde_json::to_string(&RsvpStatus::Cant).unwrap(), "\"cant\"");
    }

    #[test]
    fn status_parse_accepts_apostrophe() {
        assert_eq!(RsvpStatus::parse("can't"), Some(RsvpStatus::Cant));
        assert_eq!(RsvpStatus::parse("GOING"), Some(RsvpStatus::Going));
        assert_eq!(RsvpStatus::parse("yes"), None);
    }
}
