//! CLI command implementations.

pub mod config;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,

    /// Product export to read (default: `store.documents` from config).
    #[arg(short, long, global = true)]
    pub documents: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// Show one page of the product list.
    List {
        /// Page to show (1-indexed).
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Only list products carrying this tag.
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Search products by name.
    Search {
        /// Text to search for.
        text: String,

        /// Page of the results to show (1-indexed).
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Count products in and out of stock.
    Stats {
        /// Only count products carrying this tag.
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show the storage file ids behind a product's images.
    Assets {
        /// Product id.
        id: String,
    },
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
