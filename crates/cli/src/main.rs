//! GameKey CLI - Cart inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! gk-cli cart show
//!
//! # Add the fallback games at demo prices
//! gk-cli cart seed
//!
//! # Remove one item, then everything
//! gk-cli cart remove 1
//! gk-cli cart clear
//! ```
//!
//! # Commands
//!
//! - `cart show` - List items and the order summary
//! - `cart add` - Add an item
//! - `cart remove` - Remove an item by product id
//! - `cart clear` - Empty the cart
//! - `cart seed` - Add the fallback games with demo pricing

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gamekey_core::{CartItem, ProductId};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gk-cli")]
#[command(author, version, about = "GameKey CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List items and the order summary
    Show,
    /// Add an item to the cart
    Add {
        /// Catalog product id
        #[arg(long)]
        id: ProductId,

        /// Detail page slug
        #[arg(long)]
        slug: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Current (discounted) price
        #[arg(short, long)]
        price: Decimal,

        /// Reference price before discount (defaults to --price)
        #[arg(long)]
        original_price: Option<Decimal>,

        /// Platform label
        #[arg(long, default_value = "PC")]
        platform: String,

        /// Image URL or path
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove an item by product id
    Remove {
        /// Catalog product id
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Add the fallback games with demo pricing
    Seed,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => {
            let mut cart = commands::cart::open()?;
            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Add {
                    id,
                    slug,
                    name,
                    price,
                    original_price,
                    platform,
                    image,
                } => {
                    let item = CartItem {
                        id,
                        slug,
                        name,
                        image,
                        price,
                        original_price: original_price.unwrap_or(price),
                        platform,
                    };
                    commands::cart::add(&mut cart, item)?;
                }
                CartAction::Remove { id } => {
                    commands::cart::remove(&mut cart, id);
                }
                CartAction::Clear => commands::cart::clear(&mut cart),
                CartAction::Seed => {
                    commands::cart::seed(&mut cart, &mut rand::rng());
                }
            }
        }
    }
    Ok(())
}
