//! Duka CLI - catalog previews and gesture simulation.
//!
//! # Usage
//!
//! ```bash
//! # Print the home page rails for a seed file
//! duka rails --seed seed.json
//!
//! # Same, filtered and as JSON
//! duka rails --seed seed.json --query runner --category shoes --cap 4 --json
//!
//! # Fling a 12-item rail 30px to the left in 60ms and watch it settle
//! duka swipe --items 12 --from 100 --to 70 --duration 60 --frames
//! ```
//!
//! # Commands
//!
//! - `rails` - Group, filter and cap a seeded catalog into rails
//! - `swipe` - Drive one rail's gesture controller headlessly

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "duka")]
#[command(author, version, about = "Duka CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the category rails built from a seed file
    Rails {
        /// Seed JSON (`{"products": {...}, "categories": {...}}`)
        #[arg(short, long, env = "STOREFRONT_SEED_PATH")]
        seed: PathBuf,

        /// Search text matched against item names
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Items per rail
        #[arg(long, default_value_t = 8)]
        cap: i64,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Simulate a drag and release on one rail
    Swipe(commands::swipe::SwipeArgs),
}

fn main() {
    // Allow STOREFRONT_SEED_PATH from .env
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duka=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Rails {
            seed,
            query,
            category,
            cap,
            json,
        } => commands::rails::preview(
            &mut out,
            &seed,
            &commands::rails::PreviewOptions {
                query,
                category,
                cap,
                json,
            },
        ),
        Commands::Swipe(args) => commands::swipe::simulate(&mut out, &args),
    }
}
