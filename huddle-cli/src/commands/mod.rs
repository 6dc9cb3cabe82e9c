pub mod away;
pub mod list;
pub mod meetup;
pub mod members;
pub mod rsvp;
pub mod setup;
pub mod trip;
pub mod use_member;
pub mod watch;
pub mod whoami;
