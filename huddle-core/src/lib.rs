//! Core types and sync engine for the huddle ecosystem.
//!
//! This crate provides everything huddle-cli builds on:
//! - domain types (`Member`, `Meetup`, `Trip`, `TimeAway`, `Rsvp`)
//! - the `store` module for talking to the remote store
//! - the `sync` module: in-memory mirrors with optimistic updates

pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod member;
pub mod meetup;
pub mod rsvp;
pub mod session;
pub mod store;
pub mod sync;
pub mod time_away;
pub mod trip;

pub use error::{HuddleError, HuddleResult};
pub use member::Member;
pub use meetup::Meetup;
pub use rsvp::{EventRef, Rsvp, RsvpStatus};
pub use time_away::{AwayKind, TimeAway};
pub use trip::Trip;
