//! Catalog Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use catalog_crawler::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    storage::LocalStorage,
    utils::http::HttpSource,
};
use clap::{Parser, Subcommand};

/// catalog-crawler - University Course Catalog Crawler
#[derive(Parser, Debug)]
#[command(
    name = "catalog-crawler",
    version,
    about = "Crawls ECTS catalog pages into course records and RAG documents"
)]
struct Cli {
    /// Path to storage directory containing config and output files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl all configured departments
    Crawl {
        /// Only crawl departments with these codes (e.g. --only SE --only CE)
        #[arg(long)]
        only: Vec<String>,
    },

    /// Build RAG documents from the stored course records
    Prepare,

    /// Validate configuration and stored output
    Validate,

    /// Show stored output info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Catalog Crawler starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::info!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::with_output(&cli.storage_dir, config.output.clone());

    match cli.command {
        Command::Crawl { only } => {
            config.validate()?;
            let departments = config.selected_departments(&only);
            if departments.is_empty() {
                log::error!("No departments match {:?}", only);
                return Err(AppError::config("No matching departments"));
            }

            let source = HttpSource::from_config(&config.crawler)?;
            let (stats, written) =
                pipeline::run_crawler(&config, &source, &storage, &departments).await?;

            log::info!(
                "Process Completed! A total of {} courses have been saved to '{}'.",
                stats.record_count,
                written.location
            );
        }

        Command::Prepare => {
            pipeline::run_prepare(&storage).await?;
        }

        Command::Validate => {
            pipeline::run_validate(&config, &storage).await?;
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found (defaults)"
                }
            );

            if storage.path(&config.output.courses_file).exists() {
                pipeline::run_info(&storage).await?;
            } else {
                log::info!("No course output found yet.");
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
