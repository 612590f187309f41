//! CLI entry point for sitekit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitekit::model::{CliModel, ModelError};

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(version)]
#[command(about = "Maintenance tools for a bilingual portfolio and blog site", long_about = None)]
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
    /// Write a default sitekit.yml and the content directories
    Init {
        /// Directory to initialize (defaults to the base directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Rewrite the category in front-matter of mapped documents
    #[command(alias = "c")]
    Categorize {
        /// Only process this collection
        #[arg(short = 'C', long)]
        collection: Option<String>,
    },

    /// Generate a frontend component with the external model
    #[command(alias = "g")]
    Generate {
        /// File to generate (defaults to model.target)
        #[arg(short, long)]
        target: Option<String>,

        /// Model name (defaults to model.name)
        #[arg(short, long)]
        model: Option<String>,

        /// Print the prompt without calling the model
        #[arg(long)]
        dry_run: bool,
    },

    /// List content documents and their categories
    List {
        /// Only list this collection
        #[arg(short = 'C', long)]
        collection: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "sitekit=debug,info"
    } else {
        "sitekit=info"
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
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            sitekit::commands::init::init_site(&target_dir)?;
            println!("Initialized sitekit in {:?}", target_dir);
        }

        Commands::Categorize { collection } => {
            let site = sitekit::Site::new(&base_dir)?;
            let report = sitekit::commands::categorize::run(&site, collection.as_deref())?;
            println!("Categories: {}", report.summary());
        }

        Commands::Generate {
            target,
            model,
            dry_run,
        } => {
            let mut site = sitekit::Site::new(&base_dir)?;
            if let Some(model) = model {
                site.config.model.name = model;
            }
            let target = target.unwrap_or_else(|| site.config.model.target.clone());

            if dry_run {
                println!("{}", sitekit::commands::generate::prompt(&site, &target));
                return Ok(());
            }

            let runner = CliModel::from_config(&site.config.model);
            println!("Sending request via `{}`...", runner.command_line());

            match sitekit::commands::generate::run(&site, &runner, &target) {
                Ok(path) => println!("Generated {:?}", path),
                Err(ModelError::UnexpectedOutputFormat { marker, output }) => {
                    println!(
                        "Model output does not contain {:?}; check that `{}` is authorized.",
                        marker,
                        runner.command_line()
                    );
                    println!("DEBUG: {}", output);
                    anyhow::bail!("Unexpected model output");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::List { collection, json } => {
            let site = sitekit::Site::new(&base_dir)?;
            sitekit::commands::list::run(&site, collection.as_deref(), json)?;
        }

        Commands::Version => {
            println!("sitekit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
