//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::content::Kind;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Build-time content pipeline for a personal blog and notes site", long_about = None)]
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
    /// Load all content and write sitemap, routes and page data
    #[command(alias = "g", alias = "generate")]
    Build {
        /// Rebuild when content or config changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List documents newest first
    List {
        /// Kind to list (blog, notes, learning); all kinds if omitted
        kind: Option<Kind>,

        /// Show only the newest N documents
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print every static route
    Routes {
        /// Only routes of this kind
        kind: Option<Kind>,
    },

    /// Show a single document
    Show {
        kind: Kind,
        slug: String,
    },

    /// Print the sitemap
    Sitemap {
        /// Print the XML document instead of a table
        #[arg(long)]
        xml: bool,
    },

    /// Create a new document
    New {
        /// Kind of the document (blog, notes, learning)
        kind: Kind,

        /// Title of the new document
        title: String,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
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
        Commands::Build { watch } => {
            let site = folio::Site::new(&base_dir)?;
            tracing::info!("Building site in {:?}", base_dir);

            let built = site.build();
            if !watch {
                built?;
                println!("Built successfully!");
            } else {
                // Keep watching even if the first build fails
                if let Err(e) = built {
                    tracing::error!("Build failed: {:#}", e);
                }
                folio::commands::generate::watch(&site).await?;
            }
        }

        Commands::List { kind, limit } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::list::run(&site, kind, limit)?;
        }

        Commands::Routes { kind } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::routes::run(&site, kind)?;
        }

        Commands::Show { kind, slug } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::show::run(&site, kind, &slug)?;
        }

        Commands::Sitemap { xml } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::sitemap::run(&site, xml)?;
        }

        Commands::New { kind, title, slug } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::new::run(&site, kind, &title, slug.as_deref())?;
        }

        Commands::Clean => {
            let site = folio::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
