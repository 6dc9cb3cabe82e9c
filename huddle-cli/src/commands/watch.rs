use anyhow::Result;
use huddle_core::sync::{ChangeFeed, SyncEvent};
use owo_colors::OwoColorize;
use tokio::sync::mpsc;

use crate::context;
use crate::render::render_snapshot;

/// Keep the mirror live and re-render the dashboard on every applied
/// refresh. Runs until interrupted (or the store turns out to have no
/// schema).
pub async fn run() -> Result<()> {
    let mut app = context::connect().await?;

    let viewer = app.viewer();
    println!(
        "{}",
        render_snapshot(&app.engine.snapshot(), viewer.as_deref())
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let feed = ChangeFeed::new(app.store.clone(), tx);
    tokio::spawn(feed.run());
    tokio::spawn(app.engine.clone().run_change_listener(rx));

    while let Some(event) = app.events.recv().await {
        match event {
            SyncEvent::Refreshed => {
                println!();
                println!(
                    "{}",
                    render_snapshot(&app.engine.snapshot(), viewer.as_deref())
                );
            }
            SyncEvent::RefreshFailed(message) => {
                eprintln!("  {}", message.red());
            }
            SyncEvent::RolledBack(message) => {
                eprintln!("  {}", message.yellow());
            }
            SyncEvent::SetupRequired => {
                eprintln!(
                    "  {}",
                    "The remote store has no schema yet. Run `huddle setup`.".red()
                );
                break;
            }
        }
    }

    Ok(())
}
