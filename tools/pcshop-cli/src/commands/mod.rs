//! CLI command implementations.

pub mod brands;
pub mod build;
pub mod config;
pub mod products;
pub mod specs;

use clap::{Args, Subcommand};

/// Where products come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read products from a JSON dump instead of the API.
    #[arg(short, long, conflicts_with = "api")]
    pub file: Option<String>,

    /// Query the API even when `catalog.file` is configured.
    #[arg(long)]
    pub api: bool,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Start from a storefront query string, e.g. `category=parts&type=ram`.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category: laptop, monitor, parts (or an alias), all, build.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Exact brand.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Usage tag, matched as a substring.
    #[arg(short, long)]
    pub usage: Option<String>,

    /// Part type, parts only.
    #[arg(short = 't', long = "type")]
    pub part_type: Option<String>,

    /// Free-text search over name, brand, category and description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Lower price bound kept in the query string.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Upper price bound kept in the query string.
    #[arg(long)]
    pub max_price: Option<i64>,
}

/// Arguments for the brands command.
#[derive(Args)]
pub struct BrandsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Category to list brands for.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Part type, parts only.
    #[arg(short = 't', long = "type")]
    pub part_type: Option<String>,
}

/// Arguments for the specs command.
#[derive(Args)]
pub struct SpecsArgs {
    /// Category; omit to list every schema.
    pub category: Option<String>,

    /// Sub-category, for parts.
    pub sub_category: Option<String>,
}

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fill every slot with its cheapest in-stock part and check out without prompting.
    #[arg(short, long)]
    pub yes: bool,
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
