//! TUI rendering for huddle types.
//!
//! Extension traits that add colored terminal rendering to huddle-core
//! types using owo_colors, plus the shared dashboard view used by
//! `list` and `watch`.

use chrono::{Local, NaiveDate};
use huddle_core::sync::Snapshot;
use huddle_core::{Meetup, Member, Rsvp, RsvpStatus, TimeAway, Trip};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{DynColors, OwoColorize};

/// Spinner shown while waiting on the remote store.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message.to_string());
    bar.set_style(
        ProgressStyle::with_template("  {spinner} {msg}")
            .expect("valid spinner template")
            .tick_strings(&["·", "•", "●", "•"]),
    );
    bar.enable_steady_tick(std::time::Duration::from_millis(120));
    bar
}

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Meetup {
    fn render(&self) -> String {
        let local = self.date_time.with_timezone(&Local);
        let when = format!("{} {}", date_label(local.date_naive()), local.format("%H:%M"));

        let mut line = format!("{} {}", self.title, format!("({})", when).dimmed());
        if let Some(location) = &self.location {
            line.push_str(&format!(" @ {}", location));
        }
        line.push_str(&format!(" {}", format!("[{}]", self.id).dimmed()));
        line
    }
}

impl Render for Trip {
    fn render(&self) -> String {
        let range = format!(
            "{} to {}",
            date_label(self.start_date),
            date_label(self.end_date)
        );

        let mut line = format!("{} {}", self.title, format!("({})", range).dimmed());
        if let Some(location) = &self.location {
            line.push_str(&format!(" @ {}", location));
        }
        line.push_str(&format!(" {}", format!("[{}]", self.id).dimmed()));
        line
    }
}

impl Render for TimeAway {
    fn render(&self) -> String {
        let range = format!(
            "{} to {}",
            date_label(self.start_date),
            date_label(self.end_date)
        );

        let mut line = format!("{} away {}", member_name(&self.member_id), range);
        if let Some(kind) = self.kind {
            line.push_str(&format!(" {}", format!("({})", kind).dimmed()));
        }
        line.push_str(&format!(" {}", format!("[{}]", self.id).dimmed()));
        line
    }
}

impl Render for Member {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            swatch(&self.color),
            self.name,
            format!("({})", self.id).dimmed()
        )
    }
}

/// The dashboard: all three collections, in the store's ordering.
/// `viewer` is the acting member, for the "you: …" tally suffix.
pub fn render_snapshot(snapshot: &Snapshot, viewer: Option<&str>) -> String {
    let mut lines = Vec::new();

    lines.push("Meetups".bold().to_string());
    if snapshot.meetups.is_empty() {
        lines.push("   none planned".dimmed().to_string());
    } else {
        for meetup in &snapshot.meetups {
            lines.push(format!("   {}", meetup.render()));
            lines.push(format!("      {}", rsvp_tally(&meetup.rsvps, viewer)));
            lines.extend(rsvp_comments(&meetup.rsvps));
        }
    }

    lines.push(String::new());
    lines.push("Trips".bold().to_string());
    if snapshot.trips.is_empty() {
        lines.push("   none planned".dimmed().to_string());
    } else {
        for trip in &snapshot.trips {
            lines.push(format!("   {}", trip.render()));
            lines.push(format!("      {}", rsvp_tally(&trip.rsvps, viewer)));
            lines.extend(rsvp_comments(&trip.rsvps));
        }
    }

    lines.push(String::new());
    lines.push("Time away".bold().to_string());
    if snapshot.time_away.is_empty() {
        lines.push("   none logged".dimmed().to_string());
    } else {
        for away in &snapshot.time_away {
            lines.push(format!("   {}", away.render()));
        }
    }

    lines.join("\n")
}

/// One-line RSVP summary, e.g. "2 going, 1 maybe, you: going".
pub fn rsvp_tally(rsvps: &[Rsvp], viewer: Option<&str>) -> String {
    if rsvps.is_empty() {
        return "no RSVPs yet".dimmed().to_string();
    }

    let going = rsvps.iter().filter(|r| r.status == RsvpStatus::Going).count();
    let maybe = rsvps.iter().filter(|r| r.status == RsvpStatus::Maybe).count();
    let cant = rsvps.iter().filter(|r| r.status == RsvpStatus::Cant).count();

    let mut parts = Vec::new();
    if going > 0 {
        parts.push(format!("{} going", going).green().to_string());
    }
    if maybe > 0 {
        parts.push(format!("{} maybe", maybe).yellow().to_string());
    }
    if cant > 0 {
        parts.push(format!("{} can't", cant).red().to_string());
    }
    if let Some(viewer) = viewer {
        if let Some(own) = rsvps.iter().find(|r| r.member_id == viewer) {
            parts.push(format!("you: {}", own.status).dimmed().to_string());
        }
    }
    parts.join(", ")
}

/// One indented line per RSVP that carries a comment,
/// e.g. `Ben: "bringing snacks"`.
pub fn rsvp_comments(rsvps: &[Rsvp]) -> Vec<String> {
    rsvps
        .iter()
        .filter_map(|r| {
            let comment = r.comment.as_deref()?;
            let line = format!("{}: \"{}\"", member_name(&r.member_id), comment);
            Some(format!("      {}", line.dimmed()))
        })
        .collect()
}

/// Display name for a member id, falling back to the raw id.
pub fn member_name(id: &str) -> String {
    Member::find(id).map(|m| m.name).unwrap_or_else(|| id.to_string())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Colored dot in the member's roster color (truecolor terminals).
fn swatch(hex: &str) -> String {
    match u32::from_str_radix(hex.trim_start_matches('#'), 16) {
        Ok(value) => {
            let color = DynColors::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8);
            "●".color(color).to_string()
        }
        Err(_) => "●".to_string(),
    }
}
