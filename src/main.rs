//! CLI entry point for lp-docs

use anyhow::Result;
use clap::{Parser, Subcommand};
use lp_docs::index::{Controls, SortKey};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lp-docs")]
#[command(version)]
#[command(about = "Documentation site and index for Lux Proposals", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Build lp-index.json from the proposal files
    Index,

    /// List pages or filtered proposals
    List {
        /// Type of content to list (page, lp)
        #[arg(default_value = "lp")]
        r#type: String,

        /// Free-text query over title, author, description and number
        #[arg(short, long, default_value = "")]
        q: String,

        /// Exact proposal type
        #[arg(long = "type", default_value = "")]
        type_filter: String,

        /// Exact category
        #[arg(long, default_value = "")]
        category: String,

        /// Exact status
        #[arg(long, default_value = "")]
        status: String,

        /// Sort key
        #[arg(long, default_value = "number")]
        sort: SortKey,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "lp_docs=debug,info"
    } else {
        "lp_docs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate => {
            let app = lp_docs::LpDocs::new(&base_dir)?;
            tracing::info!("Generating static files...");
            app.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, open } => {
            let app = lp_docs::LpDocs::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            lp_docs::server::start(&app, &ip, port, open).await?;
        }

        Commands::Index => {
            let app = lp_docs::LpDocs::new(&base_dir)?;
            tracing::info!("Indexing {:?}", app.content_dir);
            app.build_index()?;
        }

        Commands::List {
            r#type,
            q,
            type_filter,
            category,
            status,
            sort,
        } => {
            let app = lp_docs::LpDocs::new(&base_dir)?;
            let controls = Controls {
                q,
                type_filter,
                category,
                status,
                sort_by: sort,
            };
            lp_docs::commands::list::run(&app, &r#type, &controls)?;
        }

        Commands::Clean => {
            let app = lp_docs::LpDocs::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("lp-docs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
