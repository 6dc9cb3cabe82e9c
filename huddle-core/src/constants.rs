//! Timing constants shared across the sync layer.

use std::time::Duration;

/// Delay before the reconciling refresh that follows an RSVP write.
/// The remote store recomputes aggregate RSVP state asynchronously,
/// so we give it a moment before refetching.
pub const RSVP_RECONCILE_DELAY: Duration = Duration::from_secs(1);

/// Window for coalescing bursts of change notifications into one refresh.
pub const CHANGE_DEBOUNCE_WINDOW: Duration = Duration::from_millis(250);

/// Interval between polling probes in the change feed.
pub const FEED_POLL_INTERVAL: Duration = Duration::from_secs(5);
