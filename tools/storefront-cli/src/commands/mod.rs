//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod products;

use clap::{Args, Subcommand};
use storefront_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show products whose title contains this text (case-insensitive).
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and total.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: ProductId,
    },
    /// Remove one unit of a product.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default config file to the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
