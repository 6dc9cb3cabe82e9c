//! Polling change feed.
//!
//! The remote store's native push channel is an external transport; what
//! the sync layer needs from it is only an opaque "collection X changed"
//! signal. This feed produces those signals by polling each collection's
//! fingerprint and comparing it against the last observation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::constants::FEED_POLL_INTERVAL;
use crate::store::{Collection, RemoteStore};

/// Emits a [`Collection`] signal whenever a collection's fingerprint
/// changes between polls.
pub struct ChangeFeed {
    store: Arc<dyn RemoteStore>,
    tx: mpsc::UnboundedSender<Collection>,
    interval: Duration,
}

impl ChangeFeed {
    pub fn new(store: Arc<dyn RemoteStore>, tx: mpsc::UnboundedSender<Collection>) -> Self {
        ChangeFeed {
            store,
            tx,
            interval: FEED_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll until the receiving side goes away.
    ///
    /// Probe failures are skipped silently: a flaky probe just delays
    /// the signal until the next tick, and the sync layer refetches
    /// wholesale anyway.
    pub async fn run(self) {
        let mut seen: HashMap<Collection, String> = HashMap::new();

        loop {
            for collection in Collection::ALL {
                let Ok(stamp) = self.store.probe(collection).await else {
                    continue;
                };

                match seen.insert(collection, stamp.clone()) {
                    // First observation primes the baseline, no signal.
                    None => {}
                    Some(previous) if previous == stamp => {}
                    Some(_) => {
                        if self.tx.send(collection).is_err() {
                            return;
                        }
                    }
                }
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
