//! Bounty CLI
//!
//! Command-line interface for the bounty API.

mod commands;
mod style;

use std::path::PathBuf;

use bounty_client::{BountyClient, Config};
use clap::{Parser, Subcommand};
use style::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bounty")]
#[command(author = "CortexLM")]
#[command(version)]
#[command(about = "Bounty Client - Browse, post and fill bounties", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Bounty API base URL (overrides the config file)
    #[arg(short, long, env = "API_BASE_URL", global = true)]
    api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available bounties (default)
    #[command(visible_alias = "ls")]
    List,

    /// List available bounties that have not been posted yet
    #[command(visible_alias = "u")]
    Unposted,

    /// Show a single bounty
    Show {
        /// Bounty ID
        id: String,
    },

    /// Create a new bounty
    #[command(visible_alias = "new")]
    Create(commands::create::CreateArgs),

    /// Update fields of an existing bounty
    Update(commands::update::UpdateArgs),

    /// Mark a bounty as filled by a user
    Fill {
        /// Bounty ID
        id: String,

        /// ID of the user who filled the bounty
        user_id: String,
    },

    /// Periodically list unposted bounties
    #[command(visible_alias = "w")]
    Watch {
        /// Seconds between checks (defaults to the fetch cooldown)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show the effective configuration
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    Ok(match &cli.api_url {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url),
        _ => config,
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    let client = BountyClient::from_config(&config);

    // Default to list if no command specified
    let command = cli.command.unwrap_or(Commands::List);

    let result = match command {
        Commands::List => commands::list::run(&client, false).await,
        Commands::Unposted => commands::list::run(&client, true).await,
        Commands::Show { id } => commands::show::run(&client, &id).await,
        Commands::Create(args) => commands::create::run(&client, args).await,
        Commands::Update(args) => commands::update::run(&client, args).await,
        Commands::Fill { id, user_id } => commands::fill::run(&client, &id, &user_id).await,
        Commands::Watch { interval } => commands::watch::run(&client, interval).await,
        Commands::Config => commands::config::run(&config),
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
