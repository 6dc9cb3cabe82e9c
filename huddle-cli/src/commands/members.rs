use anyhow::Result;
use huddle_core::Member;
use huddle_core::session::Session;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run() -> Result<()> {
    let active = Session::load()?.active();

    for member in Member::roster() {
        let marker = match &active {
            Some(a) if a.id == member.id => "*".green().to_string(),
            _ => " ".to_string(),
        };
        println!("{} {}", marker, member.render());
    }

    Ok(())
}
