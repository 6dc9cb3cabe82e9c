use anyhow::Result;
use dialoguer::Input;
use huddle_core::input::TripInput;
use owo_colors::OwoColorize;

use crate::context;
use crate::utils::when::parse_date;

pub async fn new(
    title: Option<String>,
    from: Option<String>,
    to: Option<String>,
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

    let start_date = parse_date(&prompt_or("  First day?", from)?)?;
    let end_date = parse_date(&prompt_or("  Last day?", to)?)?;

    let trip = app
        .engine
        .create_trip(TripInput {
            title,
            start_date,
            end_date,
            location,
            notes,
        })
        .await?;

    println!("{}", format!("  Created: {}", trip.title).green());

    Ok(())
}

pub async fn edit(
    id: String,
    title: Option<String>,
    from: Option<String>,
    to: Option<String>,
    location: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let app = context::connect().await?;

    let current = app
        .engine
        .snapshot()
        .trips
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("Trip '{}' not found", id))?;

    let input = TripInput {
        title: title.unwrap_or(current.title),
        start_date: match from {
            Some(d) => parse_date(&d)?,
            None => current.start_date,
        },
        end_date: match to {
            Some(d) => parse_date(&d)?,
            None => current.end_date,
        },
        location: location.or(current.location),
        notes: notes.or(current.notes),
    };

    app.engine.update_trip(&id, input).await?;
    println!("{}", "  Updated".green());

    Ok(())
}

pub async fn delete(id: String) -> Result<()> {
    let app = context::connect().await?;

    app.engine.delete_trip(&id).await?;
    println!("{}", "  Deleted".green());

    Ok(())
}

fn prompt_or(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
