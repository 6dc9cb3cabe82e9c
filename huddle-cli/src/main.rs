mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Plan meetups, trips, and time away with your group")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick which member you are
    Use {
        /// Member id or name (prompts when omitted)
        member: Option<String>,
    },
    /// Show who you are acting as
    Whoami,
    /// List the group's members
    Members,
    /// Show meetups, trips, and time away
    List,
    /// Manage meetups
    Meetup {
        #[command(subcommand)]
        command: MeetupCommands,
    },
    /// Manage trips
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage time away
    Away {
        #[command(subcommand)]
        command: AwayCommands,
    },
    /// RSVP to a meetup or trip
    Rsvp {
        /// "meetup" or "trip"
        kind: String,

        /// Event id
        id: String,

        /// going, maybe, cant, or clear
        status: String,

        /// Note shown alongside your answer (e.g. "arriving late")
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Watch for remote changes and re-render live
    Watch,
    /// Show instructions for provisioning the remote store
    Setup,
}

#[derive(Subcommand)]
enum MeetupCommands {
    /// Create a meetup
    New {
        title: Option<String>,

        /// Date/time (e.g. "2026-03-20T19:00" or "friday 7pm")
        #[arg(short, long)]
        when: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Edit a meetup (unspecified fields keep their value)
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        when: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a meetup
    Delete { id: String },
}

#[derive(Subcommand)]
enum TripCommands {
    /// Create a trip
    New {
        title: Option<String>,

        /// First day (e.g. "2026-06-01")
        #[arg(long)]
        from: Option<String>,

        /// Last day (e.g. "2026-06-07")
        #[arg(long)]
        to: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Edit a trip (unspecified fields keep their value)
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a trip
    Delete { id: String },
}

#[derive(Subcommand)]
enum AwayCommands {
    /// Log time away
    New {
        /// First day (e.g. "2026-03-01")
        #[arg(long)]
        from: Option<String>,

        /// Last day (e.g. "2026-03-07")
        #[arg(long)]
        to: Option<String>,

        /// Whose absence (defaults to you)
        #[arg(short, long)]
        member: Option<String>,

        /// holiday, work, family, or other
        #[arg(short, long)]
        kind: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit a time-away entry (unspecified fields keep their value)
    Edit {
        id: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        member: Option<String>,

        #[arg(long)]
        kind: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a time-away entry
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Use { member } => commands::use_member::run(member),
        Commands::Whoami => commands::whoami::run(),
        Commands::Members => commands::members::run(),
        Commands::List => commands::list::run().await,
        Commands::Meetup { command } => match command {
            MeetupCommands::New {
                title,
                when,
                location,
                notes,
            } => commands::meetup::new(title, when, location, notes).await,
            MeetupCommands::Edit {
                id,
                title,
                when,
                location,
                notes,
            } => commands::meetup::edit(id, title, when, location, notes).await,
            MeetupCommands::Delete { id } => commands::meetup::delete(id).await,
        },
        Commands::Trip { command } => match command {
            TripCommands::New {
                title,
                from,
                to,
                location,
                notes,
            } => commands::trip::new(title, from, to, location, notes).await,
            TripCommands::Edit {
                id,
                title,
                from,
                to,
                location,
                notes,
            } => commands::trip::edit(id, title, from, to, location, notes).await,
            TripCommands::Delete { id } => commands::trip::delete(id).await,
        },
        Commands::Away { command } => match command {
            AwayCommands::New {
                from,
                to,
                member,
                kind,
                notes,
            } => commands::away::new(from, to, member, kind, notes).await,
            AwayCommands::Edit {
                id,
                from,
                to,
                member,
                kind,
                notes,
            } => commands::away::edit(id, from, to, member, kind, notes).await,
            AwayCommands::Delete { id } => commands::away::delete(id).await,
        },
        Commands::Rsvp {
            kind,
            id,
            status,
            comment,
        } => commands::rsvp::run(kind, id, status, comment).await,
        Commands::Watch => commands::watch::run().await,
        Commands::Setup => commands::setup::run(),
    }
}
