//! Bizdir - Business directory terminal viewer
//!
//! Loads the directory CSV once per invocation and renders it.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, error, trace};

use bizdir::config::Config;
use bizdir::data::{
    featured_businesses, filter_businesses, get_business_by_id, BusinessDataLoader,
    BusinessFilters,
};
use bizdir::view::{render_detail, render_records, ViewMode, Viewport, WIDE_BREAKPOINT};

/// Browse the business directory
#[derive(Parser)]
#[command(name = "bizdir")]
#[command(about = "Business directory viewer", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List businesses (default command)
    List {
        /// Card grid or one line per business
        #[arg(long, value_enum, default_value_t = ViewMode::Grid)]
        view: ViewMode,

        /// Viewport width used for layout
        #[arg(long, default_value_t = WIDE_BREAKPOINT)]
        width: u16,

        /// Only show the first N businesses
        #[arg(long)]
        featured: Option<usize>,

        /// Search text
        #[arg(long)]
        query: Option<String>,

        /// Category (e.g. "Repair", "Kitchenware")
        #[arg(long)]
        category: Option<String>,

        /// Only verified businesses
        #[arg(long)]
        verified_only: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show one business's detail panel
    Show {
        /// Business id from the current load
        id: String,

        /// Viewport width used for layout
        #[arg(long, default_value_t = WIDE_BREAKPOINT)]
        width: u16,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("bizdir started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli.command).await {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    debug!("Resolved data location: {}", config.resource_location());

    let loader = BusinessDataLoader::from_config(&config);
    let records = loader.load().await;

    match command.unwrap_or(Commands::List {
        view: ViewMode::Grid,
        width: WIDE_BREAKPOINT,
        featured: None,
        query: None,
        category: None,
        verified_only: false,
        json: false,
    }) {
        Commands::List {
            view,
            width,
            featured,
            query,
            category,
            verified_only,
            json,
        } => {
            let filters = BusinessFilters {
                query,
                category,
                verified_only,
            };
            let records = filter_businesses(records, &filters);
            let shown = match featured {
                Some(count) => featured_businesses(&records, count),
                None => &records[..],
            };

            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                println!("{}", render_records(shown, view, Viewport::new(width)));
            }
        }
        Commands::Show { id, width, json } => {
            let record = get_business_by_id(&records, &id)
                .ok_or_else(|| anyhow!("No business with id {}", id))?;

            if json {
                let out = serde_json::to_string_pretty(record)
                    .context("Failed to serialize business")?;
                println!("{}", out);
            } else {
                println!("{}", render_detail(record, Viewport::new(width)));
            }
        }
    }

    Ok(())
}
