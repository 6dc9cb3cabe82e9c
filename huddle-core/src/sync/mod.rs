//! The synchronization layer.
//!
//! [`SyncEngine`] owns in-memory mirrors of the remote store's meetup,
//! trip, and time-away collections and is the only component that
//! mutates them. Mutations are optimistic: the local mirror changes
//! first, the remote call follows, and a failed call rolls the mirror
//! back (create/update/delete) or forces a refetch (RSVPs).
//!
//! Refreshes replace state wholesale. Each refresh takes a monotonic
//! sequence number at issue time, and a refresh that completes after a
//! newer one has already been applied is discarded, so a slow stale
//! response can never overwrite fresher state.

mod feed;
mod slot;

pub use feed::ChangeFeed;
pub use slot::Slot;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::constants::{CHANGE_DEBOUNCE_WINDOW, RSVP_RECONCILE_DELAY};
use crate::error::{HuddleError, HuddleResult};
use crate::input::{MeetupInput, TimeAwayInput, TripInput};
use crate::meetup::{Meetup, MeetupPatch, NewMeetup};
use crate::member::Member;
use crate::rsvp::{EventRef, Rsvp, RsvpStatus};
use crate::session::Session;
use crate::store::{Collection, RemoteStore};
use crate::time_away::{NewTimeAway, TimeAway, TimeAwayPatch};
use crate::trip::{NewTrip, Trip, TripPatch};

/// Top-level state of the sync layer.
///
/// `SetupRequired` is terminal: the remote store reported that its
/// schema was never provisioned, and nothing short of provisioning it
/// and restarting will help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    SetupRequired,
}

/// Out-of-band notifications for the UI layer. Best effort; the engine
/// never blocks on them.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A refresh was applied; mirrors changed.
    Refreshed,
    /// A refresh failed; mirrors are stale but plausible.
    RefreshFailed(String),
    /// An optimistic mutation was undone after its remote call failed.
    RolledBack(String),
    /// The remote store has no schema.
    SetupRequired,
}

/// Read-only copy of the mirrored collections for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    pub meetups: Vec<Meetup>,
    pub trips: Vec<Trip>,
    pub time_away: Vec<TimeAway>,
}

struct State {
    phase: Phase,
    meetups: Vec<Slot<Meetup>>,
    trips: Vec<Slot<Trip>>,
    time_away: Vec<Slot<TimeAway>>,
    /// Highest refresh sequence handed out.
    issued_seq: u64,
    /// Sequence of the last refresh whose result was applied.
    applied_seq: u64,
}

impl State {
    fn new() -> Self {
        State {
            phase: Phase::Loading,
            meetups: Vec::new(),
            trips: Vec::new(),
            time_away: Vec::new(),
            issued_seq: 0,
            applied_seq: 0,
        }
    }
}

/// The synchronization engine. Construct once at startup and share.
pub struct SyncEngine {
    store: Arc<dyn RemoteStore>,
    session: Arc<Session>,
    state: Mutex<State>,
    events: mpsc::UnboundedSender<SyncEvent>,
}

impl SyncEngine {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        session: Arc<Session>,
    ) -> (Arc<SyncEngine>, mpsc::UnboundedReceiver<SyncEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = SyncEngine {
            store,
            session,
            state: Mutex::new(State::new()),
            events: tx,
        };
        (Arc::new(engine), rx)
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Clone out the currently visible collections.
    pub fn snapshot(&self) -> Snapshot {
        let s = self.lock();
        Snapshot {
            phase: s.phase,
            meetups: s.meetups.iter().map(|m| m.get().clone()).collect(),
            trips: s.trips.iter().map(|t| t.get().clone()).collect(),
            time_away: s.time_away.iter().map(|t| t.get().clone()).collect(),
        }
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Refetch all three collections and replace the mirrors wholesale.
    ///
    /// Results arriving out of order are handled by the sequence guard:
    /// only a refresh newer than the last applied one may land.
    pub async fn refresh(&self) -> HuddleResult<()> {
        let seq = {
            let mut s = self.lock();
            if s.phase == Phase::SetupRequired {
                return Err(HuddleError::SetupRequired);
            }
            s.phase = Phase::Loading;
            s.issued_seq += 1;
            s.issued_seq
        };

        let result = tokio::try_join!(
            self.store.fetch_meetups(),
            self.store.fetch_trips(),
            self.store.fetch_time_away(),
        );

        let mut s = self.lock();
        match result {
            Ok((meetups, trips, time_away)) => {
                if seq <= s.applied_seq {
                    // A newer refresh already landed; drop this one.
                    return Ok(());
                }
                s.applied_seq = seq;
                s.meetups = meetups.into_iter().map(Slot::Confirmed).collect();
                s.trips = trips.into_iter().map(Slot::Confirmed).collect();
                s.time_away = time_away.into_iter().map(Slot::Confirmed).collect();
                s.phase = Phase::Ready;
                drop(s);
                self.emit(SyncEvent::Refreshed);
                Ok(())
            }
            Err(e) if e.is_missing_schema() => {
                s.phase = Phase::SetupRequired;
                drop(s);
                self.emit(SyncEvent::SetupRequired);
                Err(HuddleError::SetupRequired)
            }
            Err(e) => {
                // Stale but plausible until the next successful refresh.
                s.phase = Phase::Ready;
                drop(s);
                self.emit(SyncEvent::RefreshFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Consume change-feed signals, coalescing bursts into one refresh.
    pub async fn run_change_listener(
        self: Arc<Self>,
        mut rx: mpsc::UnboundedReceiver<Collection>,
    ) {
        while rx.recv().await.is_some() {
            let deadline = tokio::time::Instant::now() + CHANGE_DEBOUNCE_WINDOW;
            while let Ok(Some(_)) = tokio::time::timeout_at(deadline, rx.recv()).await {}
            let _ = self.refresh().await;
        }
    }

    // =========================================================================
    // Meetups
    // =========================================================================

    pub async fn create_meetup(&self, input: MeetupInput) -> HuddleResult<Meetup> {
        input.validate()?;
        let actor = self.actor()?;

        let placeholder_id = temp_id();
        let placeholder = Meetup {
            id: placeholder_id.clone(),
            title: input.title.clone(),
            date_time: input.date_time,
            location: input.location.clone(),
            notes: input.notes.clone(),
            created_by: actor.id.clone(),
            updated_by: None,
            created_at: None,
            updated_at: None,
            rsvps: Vec::new(),
        };
        self.lock().meetups.insert(
            0,
            Slot::Pending {
                value: placeholder,
                original: None,
            },
        );

        let new = NewMeetup {
            title: input.title,
            date_time: input.date_time,
            location: input.location,
            notes: input.notes,
            created_by: actor.id,
        };
        match self.store.insert_meetup(new).await {
            Ok(mut created) => {
                created.rsvps.clear();
                let mut s = self.lock();
                if let Some(slot) = s.meetups.iter_mut().find(|m| m.get().id == placeholder_id) {
                    *slot = Slot::Confirmed(created.clone());
                }
                Ok(created)
            }
            Err(e) => {
                self.lock().meetups.retain(|m| m.get().id != placeholder_id);
                self.emit(SyncEvent::RolledBack("meetup create failed".into()));
                Err(e.into())
            }
        }
    }

    pub async fn update_meetup(&self, id: &str, input: MeetupInput) -> HuddleResult<()> {
        input.validate()?;
        let actor = self.actor()?;

        {
            let mut s = self.lock();
            if let Some(slot) = s.meetups.iter_mut().find(|m| m.get().id == id) {
                let original = slot.get().clone();
                let mut updated = original.clone();
                updated.title = input.title.clone();
                updated.date_time = input.date_time;
                updated.location = input.location.clone();
                updated.notes = input.notes.clone();
                updated.updated_by = Some(actor.id.clone());
                *slot = Slot::Pending {
                    value: updated,
                    original: Some(original),
                };
            }
        }

        let patch = MeetupPatch {
            title: input.title,
            date_time: input.date_time,
            location: input.location,
            notes: input.notes,
            updated_by: actor.id,
        };
        match self.store.update_meetup(id, patch).await {
            Ok(()) => {
                self.confirm(|s| &mut s.meetups, id);
                Ok(())
            }
            Err(e) => {
                self.restore(|s| &mut s.meetups, id);
                self.emit(SyncEvent::RolledBack("meetup update failed".into()));
                Err(e.into())
            }
        }
    }

    pub async fn delete_meetup(&self, id: &str) -> HuddleResult<()> {
        let removed = {
            let mut s = self.lock();
            s.meetups
                .iter()
                .position(|m| m.get().id == id)
                .map(|pos| s.meetups.remove(pos))
        };

        match self.store.delete_meetup(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some(slot) = removed {
                    self.lock().meetups.insert(0, slot);
                }
                self.emit(SyncEvent::RolledBack("meetup delete failed".into()));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Trips
    // =========================================================================

    pub async fn create_trip(&self, input: TripInput) -> HuddleResult<Trip> {
        input.validate()?;
        let actor = self.actor()?;

        let placeholder_id = temp_id();
        let placeholder = Trip {
            id: placeholder_id.clone(),
            title: input.title.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            location: input.location.clone(),
            notes: input.notes.clone(),
            created_by: actor.id.clone(),
            updated_by: None,
            created_at: None,
            updated_at: None,
            rsvps: Vec::new(),
        };
        self.lock().trips.insert(
            0,
            Slot::Pending {
                value: placeholder,
                original: None,
            },
        );

        let new = NewTrip {
            title: input.title,
            start_date: input.start_date,
            end_date: input.end_date,
            location: input.location,
            notes: input.notes,
            created_by: actor.id,
        };
        match self.store.insert_trip(new).await {
            Ok(mut created) => {
                created.rsvps.clear();
                let mut s = self.lock();
                if let Some(slot) = s.trips.iter_mut().find(|t| t.get().id == placeholder_id) {
                    *slot = Slot::Confirmed(created.clone());
                }
                Ok(created)
            }
            Err(e) => {
                self.lock().trips.retain(|t| t.get().id != placeholder_id);
                self.emit(SyncEvent::RolledBack("trip create failed".into()));
                Err(e.into())
            }
        }
    }

    pub async fn update_trip(&self, id: &str, input: TripInput) -> HuddleResult<()> {
        input.validate()?;
        let actor = self.actor()?;

        {
            let mut s = self.lock();
            if let Some(slot) = s.trips.iter_mut().find(|t| t.get().id == id) {
                let original = slot.get().clone();
                let mut updated = original.clone();
                updated.title = input.title.clone();
                updated.start_date = input.start_date;
                updated.end_date = input.end_date;
                updated.location = input.location.clone();
                updated.notes = input.notes.clone();
                updated.updated_by = Some(actor.id.clone());
                *slot = Slot::Pending {
                    value: updated,
                    original: Some(original),
                };
            }
        }

        let patch = TripPatch {
            title: input.title,
            start_date: input.start_date,
            end_date: input.end_date,
            location: input.location,
            notes: input.notes,
            updated_by: actor.id,
        };
        match self.store.update_trip(id, patch).await {
            Ok(()) => {
                self.confirm(|s| &mut s.trips, id);
                Ok(())
            }
            Err(e) => {
                self.restore(|s| &mut s.trips, id);
                self.emit(SyncEvent::RolledBack("trip update failed".into()));
                Err(e.into())
            }
        }
    }

    pub async fn delete_trip(&self, id: &str) -> HuddleResult<()> {
        let removed = {
            let mut s = self.lock();
            s.trips
                .iter()
                .position(|t| t.get().id == id)
                .map(|pos| s.trips.remove(pos))
        };

        match self.store.delete_trip(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some(slot) = removed {
                    self.lock().trips.insert(0, slot);
                }
                self.emit(SyncEvent::RolledBack("trip delete failed".into()));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Time away
    // =========================================================================

    pub async fn create_time_away(&self, input: TimeAwayInput) -> HuddleResult<TimeAway> {
        input.validate()?;
        let actor = self.actor()?;
        let member_id = input.member_id.clone().unwrap_or_else(|| actor.id.clone());

        let placeholder_id = temp_id();
        let placeholder = TimeAway {
            id: placeholder_id.clone(),
            member_id: member_id.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            kind: input.kind,
            notes: input.notes.clone(),
            created_by: actor.id.clone(),
            created_at: None,
            updated_at: None,
        };
        self.lock().time_away.insert(
            0,
            Slot::Pending {
                value: placeholder,
                original: None,
            },
        );

        let new = NewTimeAway {
            member_id,
            start_date: input.start_date,
            end_date: input.end_date,
            kind: input.kind,
            notes: input.notes,
            created_by: actor.id,
        };
        match self.store.insert_time_away(new).await {
            Ok(created) => {
                let mut s = self.lock();
                if let Some(slot) = s.time_away.iter_mut().find(|t| t.get().id == placeholder_id)
                {
                    *slot = Slot::Confirmed(created.clone());
                }
                Ok(created)
            }
            Err(e) => {
                self.lock()
                    .time_away
                    .retain(|t| t.get().id != placeholder_id);
                self.emit(SyncEvent::RolledBack("time-away create failed".into()));
                Err(e.into())
            }
        }
    }

    pub async fn update_time_away(&self, id: &str, input: TimeAwayInput) -> HuddleResult<()> {
        input.validate()?;
        let actor = self.actor()?;
        let member_id = input.member_id.clone().unwrap_or_else(|| actor.id.clone());

        {
            let mut s = self.lock();
            if let Some(slot) = s.time_away.iter_mut().find(|t| t.get().id == id) {
                let original = slot.get().clone();
                let mut updated = original.clone();
                updated.member_id = member_id.clone();
                updated.start_date = input.start_date;
                updated.end_date = input.end_date;
                updated.kind = input.kind;
                updated.notes = input.notes.clone();
                *slot = Slot::Pending {
                    value: updated,
                    original: Some(original),
                };
            }
        }

        let patch = TimeAwayPatch {
            member_id,
            start_date: input.start_date,
            end_date: input.end_date,
            kind: input.kind,
            notes: input.notes,
        };
        match self.store.update_time_away(id, patch).await {
            Ok(()) => {
                self.confirm(|s| &mut s.time_away, id);
                Ok(())
            }
            Err(e) => {
                self.restore(|s| &mut s.time_away, id);
                self.emit(SyncEvent::RolledBack("time-away update failed".into()));
                Err(e.into())
            }
        }
    }

    pub async fn delete_time_away(&self, id: &str) -> HuddleResult<()> {
        let removed = {
            let mut s = self.lock();
            s.time_away
                .iter()
                .position(|t| t.get().id == id)
                .map(|pos| s.time_away.remove(pos))
        };

        match self.store.delete_time_away(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some(slot) = removed {
                    self.lock().time_away.insert(0, slot);
                }
                self.emit(SyncEvent::RolledBack("time-away delete failed".into()));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // RSVPs
    // =========================================================================

    /// Set (or clear, with `None`) the acting member's RSVP on an event.
    ///
    /// The server recomputes aggregate RSVP state, so a reconciling
    /// refresh is scheduled ~1s out no matter how the call goes; an
    /// immediate failure also refreshes right away to throw the
    /// optimistic edit out.
    pub async fn set_rsvp(
        self: &Arc<Self>,
        event: EventRef,
        status: Option<RsvpStatus>,
        comment: Option<String>,
    ) -> HuddleResult<()> {
        let actor = self.actor()?;

        {
            let mut s = self.lock();
            match &event {
                EventRef::Meetup(id) => {
                    if let Some(slot) = s.meetups.iter_mut().find(|m| m.get().id == *id) {
                        apply_rsvp_edit(&mut slot.get_mut().rsvps, &actor.id, status, comment.clone());
                    }
                }
                EventRef::Trip(id) => {
                    if let Some(slot) = s.trips.iter_mut().find(|t| t.get().id == *id) {
                        apply_rsvp_edit(&mut slot.get_mut().rsvps, &actor.id, status, comment.clone());
                    }
                }
            }
        }

        let result = match status {
            Some(status) => {
                self.store
                    .upsert_rsvp(&event, &actor.id, status, comment.as_deref())
                    .await
            }
            None => self.store.delete_rsvp(&event, &actor.id).await,
        };

        self.schedule_reconcile();

        if let Err(e) = result {
            let _ = self.refresh().await;
            return Err(e.into());
        }
        Ok(())
    }

    fn schedule_reconcile(self: &Arc<Self>) {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(RSVP_RECONCILE_DELAY).await;
            let _ = engine.refresh().await;
        });
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("sync state lock poisoned")
    }

    fn actor(&self) -> HuddleResult<Member> {
        self.session.active().ok_or(HuddleError::NoActiveMember)
    }

    fn emit(&self, event: SyncEvent) {
        let _ = self.events.send(event);
    }

    fn confirm<T, F>(&self, collection: F, id: &str)
    where
        T: Clone + HasId,
        F: FnOnce(&mut State) -> &mut Vec<Slot<T>>,
    {
        let mut s = self.lock();
        if let Some(slot) = collection(&mut *s)
            .iter_mut()
            .find(|x| x.get().record_id() == id)
        {
            slot.confirm();
        }
    }

    fn restore<T, F>(&self, collection: F, id: &str)
    where
        T: Clone + HasId,
        F: FnOnce(&mut State) -> &mut Vec<Slot<T>>,
    {
        let mut s = self.lock();
        if let Some(slot) = collection(&mut *s)
            .iter_mut()
            .find(|x| x.get().record_id() == id)
        {
            slot.rollback();
        }
    }
}

/// Upsert or remove a member's RSVP in an event's nested list, keeping
/// at most one entry per member. Each write replaces the comment; a
/// restatement without one clears it.
fn apply_rsvp_edit(
    rsvps: &mut Vec<Rsvp>,
    member_id: &str,
    status: Option<RsvpStatus>,
    comment: Option<String>,
) {
    match status {
        None => rsvps.retain(|r| r.member_id != member_id),
        Some(status) => {
            if let Some(existing) = rsvps.iter_mut().find(|r| r.member_id == member_id) {
                existing.status = status;
                existing.comment = comment;
            } else {
                rsvps.push(Rsvp {
                    id: temp_id(),
                    member_id: member_id.to_string(),
                    status,
                    comment,
                });
            }
        }
    }
}

trait HasId {
    fn record_id(&self) -> &str;
}

impl HasId for Meetup {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl HasId for Trip {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl HasId for TimeAway {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Placeholder id for records awaiting their server-assigned id.
fn temp_id() -> String {
    format!("temp-{}", Uuid::new_v4())
}

/// Whether an id is a local placeholder (not yet confirmed).
pub fn is_temp_id(id: &str) -> bool {
    id.starts_with("temp-")
}
