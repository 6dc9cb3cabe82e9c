//! Date and date/time parsing for command arguments.
//!
//! ISO forms are tried first so scripted use stays unambiguous; anything
//! else goes through natural-language parsing ("friday 7pm", "tomorrow").
//! Date/times are interpreted in local time and stored as UTC.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a meetup date/time, e.g. "2026-03-20T19:00" or "friday 7pm".
pub fn parse_date_time(input: &str) -> Result<DateTime<Utc>> {
    let naive = match NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        Ok(dt) => dt,
        Err(_) => fuzzydate::parse(input)
            .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?,
    };

    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Ambiguous local time: \"{}\"", input))?;

    Ok(local.with_timezone(&Utc))
}

/// Parse a whole-day date, e.g. "2026-06-01" or "next friday".
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    fuzzydate::parse(input)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_iso() {
        assert_eq!(
            parse_date("2026-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
        );
    }

    #[test]
    fn parse_date_natural_language() {
        assert!(parse_date("tomorrow").is_ok());
        assert!(parse_date("not a date at all xyz").is_err());
    }

    #[test]
    fn parse_date_time_iso() {
        let parsed = parse_date_time("2026-03-20T19:00").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%dT%H:%M").to_string(), "2026-03-20T19:00");
    }

    #[test]
    fn parse_date_time_natural_language() {
        assert!(parse_date_time("tomorrow 3pm").is_ok());
        assert!(parse_date_time("not a time xyz").is_err());
    }
}
