//! Travel Planner CLI - drive the session and order stores from a shell.
//!
//! # Usage
//!
//! ```bash
//! # Log in with an identity record
//! tp-cli login '{"name":"Ada","email":"ada@example.com"}'
//!
//! # Book something
//! tp-cli orders add --date 2024-03-01 --field hotel=Grand --field nights=2
//!
//! # Most recent orders first
//! tp-cli orders list
//!
//! # Which view does a path render?
//! tp-cli route /hotels
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session state
//! - `orders` - Add, list, show, delete, and count orders
//! - `route` / `routes` - Route table lookups

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use serde_json::Value;

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "tp-cli")]
#[command(author, version, about = "Travel Planner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an identity record (any JSON value)
    Login {
        /// Identity as JSON
        identity: String,
    },
    /// Log out the current user
    Logout,
    /// Show the current user
    Whoami,
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Resolve a path to its view
    Route {
        /// Path to resolve, e.g. `/hotels`
        path: String,
    },
    /// List the route table
    Routes,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders, most recent first
    List,
    /// Add an order
    Add {
        /// Order date (e.g. 2024-03-01 or 2024-03-01T10:00:00Z)
        #[arg(short, long)]
        date: String,

        /// Order id (default: random UUID)
        #[arg(short, long)]
        id: Option<String>,

        /// Extra field as `key=value`; JSON values are parsed, anything else is a string
        #[arg(short, long = "field", value_parser = commands::orders::parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Show an order
    Show {
        /// Order id
        id: String,
    },
    /// Delete every order with this id
    Delete {
        /// Order id
        id: String,
    },
    /// Count orders
    Count,
}

fn main() {
    // Defaults to info level for the CLI if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "travel_planner_cli=info,travel_planner_core=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    tracing::debug!(path = %config.storage_path.display(), "Using storage file");

    match cli.command {
        Commands::Login { identity } => commands::session::login(&config, &identity)?,
        Commands::Logout => commands::session::logout(&config)?,
        Commands::Whoami => commands::session::whoami(&config)?,
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&config)?,
            OrderAction::Add { date, id, fields } => {
                commands::orders::add(&config, id, date, fields)?;
            }
            OrderAction::Show { id } => commands::orders::show(&config, &id)?,
            OrderAction::Delete { id } => commands::orders::delete(&config, &id)?,
            OrderAction::Count => commands::orders::count(&config)?,
        },
        Commands::Route { path } => commands::routes::resolve(&config, &path)?,
        Commands::Routes => commands::routes::list(&config)?,
    }
    Ok(())
}
