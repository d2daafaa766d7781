//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fontwire_catalog::DEFAULT_API_URL;

use crate::commands::{add, check, search};

#[derive(Parser)]
#[command(name = "fontwire")]
#[command(about = "Wire Google Fonts into a Next.js app router project")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CatalogArgs {
    /// Google Fonts Developer API endpoint
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Google Fonts Developer API key; without it the catalog is not consulted
    #[arg(long, env = "GOOGLE_FONTS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Google Font family name, e.g. "Roboto Mono"
    pub name: String,
    /// Nickname used for the `--font-<alias>` property (defaults to the name in kebab case)
    #[arg(short, long)]
    pub alias: Option<String>,
    /// Weights to load: 100..900, normal, bold or regular
    #[arg(short, long = "weight", value_delimiter = ',')]
    pub weights: Vec<String>,
    /// Character subsets to load, e.g. latin, latin-ext, cyrillic
    #[arg(short, long = "subset", value_delimiter = ',')]
    pub subsets: Vec<String>,
    /// Project root containing the `app` directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Import the loader as a PascalCase identifier instead of the `next/font/google` export name
    #[arg(long)]
    pub pascal_case: bool,
    /// Skip the catalog lookup
    #[arg(long)]
    pub offline: bool,
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a font to app/layout.tsx and app/globals.css
    Add {
        #[command(flatten)]
        args: AddArgs,
    },
    /// Search the Google Fonts catalog by family name
    Search {
        query: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Report whether an alias is already registered in app/globals.css
    Check {
        alias: String,
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Add { args } => add(&args)?,
            Commands::Search { query, limit, catalog } => search(&query, limit, &catalog)?,
            Commands::Check { alias, root } => check(&alias, &root)?,
        }
        Ok(())
    }
}
