//! Vitrine CLI - SEO metadata, sitemap and robots.txt for small business sites.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vitrine_content::CollectionKind;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "SEO metadata, sitemap and robots.txt generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create site.toml and sample content in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Write sitemap.xml, robots.txt and seo-index.json
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// lastmod date of every URL, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the resolved metadata of a content entry
    Meta {
        /// Collection of the entry (services, pages, testimonials)
        collection: CollectionKind,

        /// Entry slug
        slug: String,

        /// Print <head> tags instead of JSON
        #[arg(long)]
        html: bool,
    },

    /// Show sitemap statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve sitemap.xml, robots.txt and metadata endpoints
    Serve {
        /// Port to listen on (defaults to config or 4321)
        #[arg(short, long)]
        port: Option<u16>,

        /// Open browser on start
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(Path::new("."), yes)?;
        }
        Commands::Build { output, date } => {
            commands::build::run(&cli.config, output, date)?;
        }
        Commands::Meta {
            collection,
            slug,
            html,
        } => {
            commands::meta::run(&cli.config, collection, &slug, html)?;
        }
        Commands::Stats { json } => {
            commands::stats::run(&cli.config, json)?;
        }
        Commands::Serve { port, open } => {
            commands::serve::run(&cli.config, port, open).await?;
        }
    }

    Ok(())
}
