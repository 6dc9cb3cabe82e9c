use anyhow::Result;

use crate::context;
use crate::render::render_snapshot;

pub async fn run() -> Result<()> {
    let app = context::connect().await?;

    let viewer = app.viewer();
    println!(
        "{}",
        render_snapshot(&app.engine.snapshot(), viewer.as_deref())
    );

    Ok(())
}
