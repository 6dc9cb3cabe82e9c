//! Shared startup for connected commands.

use std::sync::Arc;

use anyhow::Result;
use huddle_core::config::HuddleConfig;
use huddle_core::session::Session;
use huddle_core::store::{PostgrestStore, RemoteStore};
use huddle_core::sync::{SyncEngine, SyncEvent};
use tokio::sync::mpsc;

use crate::render::spinner;

/// Everything a connected command needs: the engine over a live store,
/// the session, and the engine's event channel.
pub struct App {
    pub engine: Arc<SyncEngine>,
    pub events: mpsc::UnboundedReceiver<SyncEvent>,
    pub store: Arc<dyn RemoteStore>,
    pub session: Arc<Session>,
}

impl App {
    /// Id of the acting member, if one is selected.
    pub fn viewer(&self) -> Option<String> {
        self.session.active().map(|m| m.id)
    }
}

/// Load config and session, connect to the remote store, and run the
/// initial refresh so commands start from a current mirror.
pub async fn connect() -> Result<App> {
    let config = HuddleConfig::load()?;
    let store: Arc<dyn RemoteStore> = Arc::new(PostgrestStore::from_config(&config)?);
    let session = Arc::new(Session::load()?);

    let (engine, events) = SyncEngine::new(store.clone(), session.clone());

    let spinner = spinner("Syncing");
    let result = engine.refresh().await;
    spinner.finish_and_clear();
    result?;

    Ok(App {
        engine,
        events,
        store,
        session,
    })
}
