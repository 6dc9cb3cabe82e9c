use anyhow::Result;
use huddle_core::config::HuddleConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let path = HuddleConfig::config_path()?;

    println!("{}", "huddle needs a hosted Postgres-over-REST store (e.g. Supabase).".bold());
    println!();
    println!("1. Create a project and provision these tables:");
    println!("   members, meetups, trips, time_away, rsvps");
    println!();
    println!("   rsvps needs unique indexes on (meetup_id, member_id) and");
    println!("   (trip_id, member_id) so responses upsert instead of piling up,");
    println!("   plus a responded_at timestamptz column; meetups, trips, and");
    println!("   time_away need a nullable updated_at timestamptz column.");
    println!();
    println!("2. Point huddle at it in {}:", path.display());
    println!();
    println!("   store_url = \"https://<project>.supabase.co\"");
    println!("   api_key = \"<anon key>\"");
    println!();
    println!("   (or set HUDDLE_STORE_URL / HUDDLE_API_KEY)");
    println!();
    println!("3. Run `huddle use` to pick who you are, then `huddle list`.");

    Ok(())
}
