//! CLI entrypoint for academy-roster
//!
//! Wires the HTTP gateway into a roster session, runs one load cycle and
//! prints the merged roster.

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use roster_application::RosterSession;
use roster_domain::{Person, RosterKind};
use roster_infrastructure::{ConfigLoader, HttpDirectoryGateway};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which member roster to load
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Students enrolled in the center or in owned groups
    Students,
    /// Teaching staff
    Teachers,
    /// Assistant staff
    Assistants,
}

impl From<KindArg> for RosterKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Students => RosterKind::Students,
            KindArg::Teachers => RosterKind::Teachers,
            KindArg::Assistants => RosterKind::Assistants,
        }
    }
}

/// CLI arguments for academy-roster
#[derive(Parser, Debug)]
#[command(name = "academy-roster")]
#[command(author, version, about = "Load and merge academy member rosters")]
#[command(long_about = r#"
academy-roster enumerates the members visible to the authenticated staff
account and prints one merged, deduplicated roster.

Accounts with center-wide access get the full center listing in a single
call. Accounts without it fall back to enumerating each owned group and
merging the results, so the same person appearing in several groups shows
up once with all group labels attached.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./roster.toml       Project-level config
3. ~/.config/academy-roster/config.toml   Global config

Example:
  academy-roster --kind students
  academy-roster --kind teachers --search smith
  academy-roster --base-url https://academy.example/api --json
"#)]
struct Cli {
    /// Which roster to load
    #[arg(short, long, value_enum, default_value = "students")]
    kind: KindArg,

    /// Case-insensitive filter over name, email, center and group labels
    #[arg(short, long, value_name = "TERM")]
    search: Option<String>,

    /// Print the roster as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Base URL of the academy backend (overrides config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Bearer token (overrides config; falls back to ROSTER_API_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    no_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.api.token = Some(token);
    } else if config.api.token.is_none() {
        config.api.token = std::env::var("ROSTER_API_TOKEN").ok();
    }

    let kind: RosterKind = cli.kind.into();
    info!("Loading {kind} roster from {}", config.api.base_url);

    // === Dependency Injection ===
    let gateway = Arc::new(HttpDirectoryGateway::new(&config.api)?);
    let session = RosterSession::new(gateway, kind);

    session.reload().await;

    if session.has_failed() {
        bail!("failed to load the {kind} roster; check connectivity and credentials (run with -v for details)");
    }

    let people = match &cli.search {
        Some(term) => session.filter(term),
        None => session.roster(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&people)?);
        return Ok(());
    }

    if people.is_empty() {
        println!("No members found.");
        return Ok(());
    }

    print_table(&people);
    Ok(())
}

fn print_table(people: &[Person]) {
    let name_width = people
        .iter()
        .map(|p| p.name.chars().count())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or(0);
    let email_width = people
        .iter()
        .map(|p| p.email.chars().count())
        .chain(std::iter::once("EMAIL".len()))
        .max()
        .unwrap_or(0);

    println!(
        "{:<name_width$}  {:<email_width$}  {:<8}  {}",
        "NAME", "EMAIL", "STATUS", "GROUPS"
    );
    for person in people {
        println!(
            "{:<name_width$}  {:<email_width$}  {:<8}  {}",
            person.name,
            person.email,
            person.status_hint,
            person.memberships.join(", "),
        );
    }
}
