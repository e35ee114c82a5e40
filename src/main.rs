use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use ims_importer::app::{FixLocationsUseCase, ImportOptions, ImportUseCase};
use ims_importer::config::Config;
use ims_importer::logging::init_logging;
use ims_importer::pipeline::SanityClient;

#[derive(Parser)]
#[command(name = "ims_importer")]
#[command(about = "Dedupe, normalize and stage scraped Irish music data for Sanity import")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage a scraped band batch for import
    Bands {
        /// Input file (defaults to irish_bands_data.json in the data dir)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Skip the query for records already in Sanity
        #[arg(long)]
        skip_existing_check: bool,
        /// Backfill still-unlocated bands from the reference city
        /// distribution (best-effort guesses)
        #[arg(long)]
        guess_locations: bool,
    },
    /// Stage a scraped venue batch for import
    Venues {
        /// Input file (defaults to irish_venues_data.json in the data dir)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Skip the query for records already in Sanity
        #[arg(long)]
        skip_existing_check: bool,
    },
    /// Stage a scraped studio batch for import
    Studios {
        /// Input file (defaults to irish_studios_data.json in the data dir)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Skip the query for records already in Sanity
        #[arg(long)]
        skip_existing_check: bool,
    },
    /// Re-standardize location data in an existing band batch
    FixLocations {
        /// Input file (defaults to irish_bands_data.json in the data dir)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    init_logging();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            debug!(error = %err, "config.toml not loaded, using defaults");
            Config::default()
        }
    };

    let client = SanityClient::new(&config.sanity)?;
    let importer = ImportUseCase::new(&config, &client);

    match cli.command {
        Commands::Bands {
            input,
            skip_existing_check,
            guess_locations,
        } => {
            let opts = ImportOptions {
                input,
                skip_existing_check,
                guess_locations,
            };
            importer.run_bands(&opts).await?;
        }
        Commands::Venues {
            input,
            skip_existing_check,
        } => {
            let opts = ImportOptions {
                input,
                skip_existing_check,
                ..Default::default()
            };
            importer.run_venues(&opts).await?;
        }
        Commands::Studios {
            input,
            skip_existing_check,
        } => {
            let opts = ImportOptions {
                input,
                skip_existing_check,
                ..Default::default()
            };
            importer.run_studios(&opts).await?;
        }
        Commands::FixLocations { input } => {
            FixLocationsUseCase::new(&config).run(input.as_deref())?;
        }
    }

    Ok(())
}
