use anyhow::Result;
use dialoguer::Input;
use huddle_core::Member;
use huddle_core::input::TimeAwayInput;
use huddle_core::time_away::AwayKind;
use owo_colors::OwoColorize;

use crate::context;
use crate::render::member_name;
use crate::utils::when::parse_date;

pub async fn new(
    from: Option<String>,
    to: Option<String>,
    member: Option<String>,
    kind: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let app = context::connect().await?;

    let start_date = parse_date(&prompt_or("  First day?", from)?)?;
    let end_date = parse_date(&prompt_or("  Last day?", to)?)?;
    let member_id = resolve_member(member)?;
    let kind = parse_kind(kind)?;

    let away = app
        .engine
        .create_time_away(TimeAwayInput {
            member_id,
            start_date,
            end_date,
            kind,
            notes,
        })
        .await?;

    println!(
        "{}",
        format!("  Logged time away for {}", member_name(&away.member_id)).green()
    );

    Ok(())
}

pub async fn edit(
    id: String,
    from: Option<String>,
    to: Option<String>,
    member: Option<String>,
    kind: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let app = context::connect().await?;

    let current = app
        .engine
        .snapshot()
        .time_away
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| anyhow::anyhow!("Time-away entry '{}' not found", id))?;

    let input = TimeAwayInput {
        member_id: resolve_member(member)?.or(Some(current.member_id)),
        start_date: match from {
            Some(d) => parse_date(&d)?,
            None => current.start_date,
        },
        end_date: match to {
            Some(d) => parse_date(&d)?,
            None => current.end_date,
        },
        kind: parse_kind(kind)?.or(current.kind),
        notes: notes.or(current.notes),
    };

    app.engine.update_time_away(&id, input).await?;
    println!("{}", "  Updated".green());

    Ok(())
}

pub async fn delete(id: String) -> Result<()> {
    let app = context::connect().await?;

    app.engine.delete_time_away(&id).await?;
    println!("{}", "  Deleted".green());

    Ok(())
}

fn resolve_member(member: Option<String>) -> Result<Option<String>> {
    match member {
        None => Ok(None),
        Some(name) => Member::resolve(&name)
            .map(|m| Some(m.id))
            .ok_or_else(|| anyhow::anyhow!("Member '{}' not found", name)),
    }
}

fn parse_kind(kind: Option<String>) -> Result<Option<AwayKind>> {
    match kind {
        None => Ok(None),
        Some(k) => AwayKind::parse(&k).map(Some).ok_or_else(|| {
            anyhow::anyhow!("Unknown kind '{}'. Use holiday, work, family, or other.", k)
        }),
    }
}

fn prompt_or(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
