use anyhow::Result;
use dialoguer::Input;
use huddle_core::input::MeetupInput;
use owo_colors::OwoColorize;

use crate::context;
use crate::utils::when::parse_date_time;

pub async fn new(
    title: Option<String>,
    when: Option<String>,
    location: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let app = context::connect().await?;

    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    let date_time = match when {
        Some(w) => parse_date_time(&w)?,
        None => {
            let input: String = Input::new().with_prompt("  When?").interact_text()?;
            parse_date_time(&input)?
        }
    };

    let meetup = app
        .engine
        .create_meetup(MeetupInput {
            title,
            date_time,
            location,
            notes,
        })
        .await?;

    println!("{}", format!("  Created: {}", meetup.title).green());

    Ok(())
}

pub async fn edit(
    id: String,
    title: Option<String>,
    when: Option<String>,
    location: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let app = context::connect().await?;

    let current = app
        .engine
        .snapshot()
        .meetups
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow::anyhow!("Meetup '{}' not found", id))?;

    let input = MeetupInput {
        title: title.unwrap_or(current.title),
        date_time: match when {
            Some(w) => parse_date_time(&w)?,
            None => current.date_time,
        },
        location: location.or(current.location),
        notes: notes.or(current.notes),
    };

    app.engine.update_meetup(&id, input).await?;
    println!("{}", "  Updated".green());

    Ok(())
}

pub async fn delete(id: String) -> Result<()> {
    let app = context::connect().await?;

    app.engine.delete_meetup(&id).await?;
    println!("{}", "  Deleted".green());

    Ok(())
}
