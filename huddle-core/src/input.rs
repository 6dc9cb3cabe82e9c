//! Form inputs for creating and editing events.
//!
//! Validation here is deliberately superficial (required fields, end date
//! not before start date) and runs before any remote call is issued.
//! Anything deeper is the remote store's problem.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{HuddleError, HuddleResult};
use crate::time_away::AwayKind;

/// Input for creating or editing a meetup.
#[derive(Debug, Clone)]
pub struct MeetupInput {
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl MeetupInput {
    pub fn validate(&self) -> HuddleResult<()> {
        require_non_empty("title", &self.title)
    }
}

/// Input for creating or editing a trip.
#[derive(Debug, Clone)]
pub struct TripInput {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl TripInput {
    pub fn validate(&self) -> HuddleResult<()> {
        require_non_empty("title", &self.title)?;
        require_ordered(self.start_date, self.end_date)
    }
}

/// Input for creating or editing a time-away entry.
///
/// `member_id` of `None` means "the acting member's own absence".
#[derive(Debug, Clone)]
pub struct TimeAwayInput {
    pub member_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub kind: Option<AwayKind>,
    pub notes: Option<String>,
}

impl TimeAwayInput {
    pub fn validate(&self) -> HuddleResult<()> {
        require_ordered(self.start_date, self.end_date)
    }
}

fn require_non_empty(field: &str, value: &str) -> HuddleResult<()> {
    if value.trim().is_empty() {
        return Err(HuddleError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_ordered(start: NaiveDate, end: NaiveDate) -> HuddleResult<()> {
    if end < start {
        return Err(HuddleError::Validation(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn meetup_requires_title() {
        let input = MeetupInput {
            title: "   ".to_string(),
            date_time: Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap(),
            location: None,
            notes: None,
        };
        assert!(matches!(input.validate(), Err(HuddleError::Validation(_))));
    }

    #[test]
    fn trip_rejects_end_before_start() {
        let input = TripInput {
            title: "Beach week".to_string(),
            start_date: date(2025, 6, 1),
            end_date: date(2025, 5, 30),
            location: None,
            notes: None,
        };
        assert!(matches!(input.validate(), Err(HuddleError::Validation(_))));
    }

    #[test]
    fn trip_allows_single_day() {
        let input = TripInput {
            title: "Day hike".to_string(),
            start_date: date(2025, 6, 1),
            end_date: date(2025, 6, 1),
            location: None,
            notes: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn time_away_rejects_end_before_start() {
        let input = TimeAwayInput {
            member_id: None,
            start_date: date(2025, 3, 10),
            end_date: date(2025, 3, 9),
            kind: Some(AwayKind::Work),
            notes: None,
        };
        assert!(matches!(input.validate(), Err(HuddleError::Validation(_))));
    }
}
