//! PCShop CLI - browse the storefront catalog from the terminal.
//!
//! Commands:
//! - `pcshop products` - List products through the storefront filters
//! - `pcshop brands` - Show the brand facet for a category
//! - `pcshop specs` - Inspect specification schemas
//! - `pcshop build` - Assemble a custom PC and check it out
//! - `pcshop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{BrandsArgs, BuildArgs, ConfigArgs, ProductsArgs, SpecsArgs};

/// PCShop CLI - laptops, monitors and PC parts from the terminal
#[derive(Parser)]
#[command(name = "pcshop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching the storefront filters
    Products(ProductsArgs),

    /// Show brands available in a category
    Brands(BrandsArgs),

    /// Show specification fields for a category
    Specs(SpecsArgs),

    /// Assemble a custom PC build
    Build(BuildArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Brands(args) => commands::brands::run(args, &ctx).await,
        Commands::Specs(args) => commands::specs::run(args, &ctx).await,
        Commands::Build(args) => commands::build::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
