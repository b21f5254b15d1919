//! cartkit CLI - Inspect and edit carts from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Print the normalized view model of a cart
//! cartkit show cart.json
//!
//! # Read a Shopify Storefront API cart instead of the raw shape
//! cartkit show shopify-cart.json --format shopify
//!
//! # Apply edits in order and print the resulting state
//! cartkit edit cart.json --op inc:A --op del:B
//!
//! # ...and print the commit payload that would be saved
//! cartkit edit cart.json --op inc:A --op del:B --commit
//! ```
//!
//! # Commands
//!
//! - `show` - Normalize a cart and print it
//! - `edit` - Apply quantity edits, optionally committing them
//!
//! # Environment Variables
//!
//! See [`cartkit::CartConfig`] (`CART_MINOR_UNIT_DIGITS`,
//! `CART_STRICT_QUANTITY`) and `RUST_LOG` for log filtering.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cartkit::CartConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::InputFormat;
use commands::edit::EditOp;

#[derive(Parser)]
#[command(name = "cartkit")]
#[command(author, version, about = "Cart view-model tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a cart and print its view model
    Show {
        /// Path to the cart JSON document
        file: PathBuf,

        /// Shape of the input document
        #[arg(short, long, value_enum, default_value_t = InputFormat::Raw)]
        format: InputFormat,
    },
    /// Apply quantity edits to a cart
    Edit {
        /// Path to the cart JSON document
        file: PathBuf,

        /// Shape of the input document
        #[arg(short, long, value_enum, default_value_t = InputFormat::Raw)]
        format: InputFormat,

        /// Edit to apply, in order: `inc:<line id>`, `dec:<line id>` or `del:<line id>`
        #[arg(short, long = "op")]
        ops: Vec<EditOp>,

        /// Print the commit payload after applying the edits
        #[arg(short, long)]
        commit: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable.
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartkit=info,cartkit_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Show { file, format } => {
            let raw = commands::load_cart(&file, format)?;
            commands::show::run(&raw, &config, &mut stdout)?;
        }
        Commands::Edit {
            file,
            format,
            ops,
            commit,
        } => {
            let raw = commands::load_cart(&file, format)?;
            commands::edit::run(&raw, &config, &ops, commit, format, &mut stdout).await?;
        }
    }
    Ok(())
}
