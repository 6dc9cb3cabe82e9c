use anyhow::Result;
use dialoguer::Select;
use huddle_core::Member;
use huddle_core::session::Session;
use owo_colors::OwoColorize;

pub fn run(member: Option<String>) -> Result<()> {
    let session = Session::load()?;
    let roster = Member::roster();

    let member = match member {
        Some(name) => Member::resolve(&name).ok_or_else(|| {
            let available: Vec<_> = roster.iter().map(|m| m.id.as_str()).collect();
            anyhow::anyhow!("Member '{}' not found. Available: {}", name, available.join(", "))
        })?,
        None => {
            let items: Vec<&str> = roster.iter().map(|m| m.name.as_str()).collect();
            let selection = Select::new()
                .with_prompt("  Who are you?")
                .items(&items)
                .default(0)
                .interact()?;
            roster[selection].clone()
        }
    };

    session.set_active(member.clone())?;
    println!("{}", format!("  Acting as {}", member.name).green());

    Ok(())
}
