//! Remote store boundary.
//!
//! The hosted backend owns persistence, identity of rows, and change
//! detection; the client consumes it through the [`RemoteStore`] trait.
//! [`postgrest::PostgrestStore`] is the production implementation; tests
//! substitute their own.

pub mod postgrest;

use async_trait::async_trait;
use thiserror::Error;

use crate::meetup::{Meetup, MeetupPatch, NewMeetup};
use crate::rsvp::{EventRef, RsvpStatus};
use crate::time_away::{NewTimeAway, TimeAway, TimeAwayPatch};
use crate::trip::{NewTrip, Trip, TripPatch};

pub use postgrest::PostgrestStore;

/// Errors from remote store calls.
///
/// There is exactly one error per failed call: the client never retries
/// or backs off. Recovery is the sync layer's rollback/refetch logic.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store is reachable but its tables have not been provisioned.
    #[error("the remote store's schema is missing")]
    MissingSchema,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_missing_schema(&self) -> bool {
        matches!(self, StoreError::MissingSchema)
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The record collections the store holds (and notifies changes for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Meetups,
    Trips,
    TimeAway,
    Rsvps,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Meetups,
        Collection::Trips,
        Collection::TimeAway,
        Collection::Rsvps,
    ];

    /// Table name in the remote store.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Meetups => "meetups",
            Collection::Trips => "trips",
            Collection::TimeAway => "time_away",
            Collection::Rsvps => "rsvps",
        }
    }
}

/// The remote store's query surface, as the sync layer consumes it.
///
/// Reads return full date-sorted collections with RSVPs joined in;
/// writes are insert (returning the server-assigned row), update-by-id,
/// delete-by-id, and upsert-on-conflict for RSVPs.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_meetups(&self) -> StoreResult<Vec<Meetup>>;
    async fn fetch_trips(&self) -> StoreResult<Vec<Trip>>;
    async fn fetch_time_away(&self) -> StoreResult<Vec<TimeAway>>;

    async fn insert_meetup(&self, new: NewMeetup) -> StoreResult<Meetup>;
    async fn update_meetup(&self, id: &str, patch: MeetupPatch) -> StoreResult<()>;
    async fn delete_meetup(&self, id: &str) -> StoreResult<()>;

    async fn insert_trip(&self, new: NewTrip) -> StoreResult<Trip>;
    async fn update_trip(&self, id: &str, patch: TripPatch) -> StoreResult<()>;
    async fn delete_trip(&self, id: &str) -> StoreResult<()>;

    async fn insert_time_away(&self, new: NewTimeAway) -> StoreResult<TimeAway>;
    async fn update_time_away(&self, id: &str, patch: TimeAwayPatch) -> StoreResult<()>;
    async fn delete_time_away(&self, id: &str) -> StoreResult<()>;

    /// Upsert the member's RSVP on the event, keyed on (event, member).
    /// The comment replaces any previous one; `None` clears it.
    async fn upsert_rsvp(
        &self,
        event: &EventRef,
        member_id: &str,
        status: RsvpStatus,
        comment: Option<&str>,
    ) -> StoreResult<()>;

    /// Remove the member's RSVP from the event, if any.
    async fn delete_rsvp(&self, event: &EventRef, member_id: &str) -> StoreResult<()>;

    /// Opaque fingerprint of a collection's current contents, used by
    /// the polling change feed. Any change to the collection must change
    /// the fingerprint; the feed treats it as "something changed".
    async fn probe(&self, collection: Collection) -> StoreResult<String>;
}
