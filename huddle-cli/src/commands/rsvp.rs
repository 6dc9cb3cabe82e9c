use anyhow::Result;
use huddle_core::{EventRef, RsvpStatus};
use owo_colors::OwoColorize;

use crate::context;

pub async fn run(kind: String, id: String, status: String, comment: Option<String>) -> Result<()> {
    let app = context::connect().await?;

    let event = match kind.as_str() {
        "meetup" => EventRef::Meetup(id),
        "trip" => EventRef::Trip(id),
        other => anyhow::bail!("Unknown event kind '{}'. Use \"meetup\" or \"trip\".", other),
    };

    let status = match status.as_str() {
        "clear" => None,
        s => Some(RsvpStatus::parse(s).ok_or_else(|| {
            anyhow::anyhow!("Unknown status '{}'. Use going, maybe, cant, or clear.", s)
        })?),
    };

    if status.is_none() && comment.is_some() {
        anyhow::bail!("A comment needs an answer to attach to; \"clear\" removes both.");
    }

    app.engine.set_rsvp(event, status, comment).await?;

    match status {
        Some(s) => println!("{}", format!("  RSVP'd {}", s).green()),
        None => println!("{}", "  RSVP cleared".green()),
    }

    Ok(())
}
