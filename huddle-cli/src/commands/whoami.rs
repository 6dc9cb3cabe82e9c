use anyhow::Result;
use huddle_core::session::Session;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run() -> Result<()> {
    let session = Session::load()?;

    match session.active() {
        Some(member) => println!("{}", member.render()),
        None => println!("{}", "No member selected. Run `huddle use`.".dimmed()),
    }

    Ok(())
}
