//! Time-away types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A window during which a member is unavailable or traveling.
///
/// `member_id` is whose absence this records; `created_by` tracks the
/// author (anyone can log time away on a member's behalf).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAway {
    pub id: String,
    pub member_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AwayKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Why the member is away. Stored capitalized in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AwayKind {
    Holiday,
    Work,
    Family,
    Other,
}

impl AwayKind {
    pub fn parse(s: &str) -> Option<AwayKind> {
        match s.to_lowercase().as_str() {
            "holiday" => Some(AwayKind::Holiday),
            "work" => Some(AwayKind::Work),
            "family" => Some(AwayKind::Family),
            "other" => Some(AwayKind::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AwayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwayKind::Holiday => write!(f, "Holiday"),
            AwayKind::Work => write!(f, "Work"),
            AwayKind::Family => write!(f, "Family"),
            AwayKind::Other => write!(f, "Other"),
        }
    }
}

/// Insert payload for a new time-away entry.
#[derive(Debug, Clone, Serialize)]
pub struct NewTimeAway {
    pub member_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: Option<AwayKind>,
    pub notes: Option<String>,
    pub created_by: String,
}

/// Update payload for an existing time-away entry.
#[derive(Debug, Clone, Serialize)]
pub struct TimeAwayPatch {
    pub member_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: Option<AwayKind>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&AwayKind::Holiday).unwrap(), "\"Holiday\"");
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(AwayKind::parse("WORK"), Some(AwayKind::Work));
        assert_eq!(AwayKind::parse("vacation"), None);
    }
}
