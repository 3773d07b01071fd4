//! Sportsgear CLI - shipping quotes, password checks and catalog inspection.
//!
//! # Usage
//!
//! ```bash
//! # Quote shipping for a 40 kg and a 2.5 kg item
//! sg-cli quote -w 40 -w 2.5 --method standard
//!
//! # Rate a password the way the signup meter does
//! sg-cli password-strength 'Tr41n!ng'
//!
//! # List the catalog (built-in mock, or SPORTSGEAR_CATALOG_PATH / --file)
//! sg-cli catalog products
//! sg-cli catalog orders --status shipped --json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sportsgear_core::{OrderStatus, ShippingMethod};

mod commands;

#[derive(Parser)]
#[command(name = "sg-cli")]
#[command(author, version, about = "Sportsgear CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the shipping cost for a set of item weights
    Quote {
        /// Item weight in kilograms (repeat per item)
        #[arg(short, long = "weight")]
        weights: Vec<String>,

        /// Shipping method (`standard` or `express`)
        #[arg(short, long, default_value = "standard")]
        method: ShippingMethod,
    },
    /// Rate a password with the signup strength meter
    PasswordStrength {
        /// Password to rate
        password: String,
    },
    /// Inspect the catalog
    Catalog {
        #[command(subcommand)]
        target: CatalogTarget,

        /// JSON catalog file (defaults to `SPORTSGEAR_CATALOG_PATH`, then the built-in mock)
        #[arg(short, long, global = true)]
        file: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CatalogTarget {
    /// List products
    Products,
    /// List orders, newest first
    Orders {
        /// Only orders with this status
        #[arg(short, long)]
        status: Option<OrderStatus>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Quote { weights, method } => commands::quote::run(&weights, method),
        Commands::PasswordStrength { password } => {
            commands::password::run(&password);
            Ok(())
        }
        Commands::Catalog { target, file, json } => {
            let catalog = commands::catalog::open(file)?;
            match target {
                CatalogTarget::Products => commands::catalog::products(&catalog, json),
                CatalogTarget::Orders { status } => {
                    commands::catalog::orders(&catalog, status, json)
                }
            }
        }
    }
}
