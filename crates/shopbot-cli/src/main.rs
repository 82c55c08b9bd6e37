mod catalog;
mod export;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopbot-cli")]
#[command(about = "Shopbot catalog and search tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank a local catalog snapshot against a query and print the summary
    Search {
        /// Snapshot file (JSON array, or object with a `products` array)
        #[arg(long)]
        snapshot: PathBuf,
        /// Manufacturer marker ranked first (defaults to "medi pharma")
        #[arg(long)]
        brand: Option<String>,
        /// Search text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show which product keywords a customer message triggers
    Intent {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Download the full WooCommerce catalog into a snapshot file
    Export {
        /// Destination file; parent directories are created
        #[arg(long)]
        output: PathBuf,
        /// Only export products matching this WooCommerce search
        #[arg(long)]
        search: Option<String>,
        /// Only export products in this WooCommerce category id
        #[arg(long)]
        category: Option<String>,
        /// Pause between page requests, in milliseconds
        #[arg(long, default_value_t = 250)]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            snapshot,
            brand,
            query,
        }) => {
            let summary = catalog::search_snapshot(&snapshot, brand.as_deref(), &query.join(" "))?;
            println!("{summary}");
        }
        Some(Commands::Intent { message }) => {
            println!("{}", catalog::describe_intent(&message.join(" ")));
        }
        Some(Commands::Export {
            output,
            search,
            category,
            delay_ms,
        }) => {
            let config = shopbot_core::load_app_config_from_env()?;
            export::run_export(&config, &output, search, category, delay_ms).await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
