use std::path::PathBuf;

use agroplan::config::Config;
use agroplan::render::OutputFormat;
use agroplan_catalog::{Crop, PlotType, ProblemType};
use anyhow::Result;
use clap::{Parser, Subcommand};

/// agroplan - Integrated crop protection planning
#[derive(Parser)]
#[command(name = "agroplan", version)]
#[command(about = "Integrated treatment plans for vegetable crops", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Directory of per-crop JSON documents replacing the embedded catalog
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a season treatment plan
    Plan {
        /// Crop, e.g. tomato, cabbage, garlic
        #[arg(long)]
        crop: Crop,

        /// Plot type: home or field
        #[arg(long, default_value = "home")]
        plot: PlotType,

        /// Growing season length in days (overrides config default)
        #[arg(long)]
        days: Option<u32>,

        /// RNG seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// List catalog products of a crop for one problem type
    Products {
        #[arg(long)]
        crop: Crop,

        #[arg(long, default_value = "home")]
        plot: PlotType,

        /// weeds, diseases, pests or integrated
        #[arg(long)]
        problem: ProblemType,

        /// Control filter, repeatable (e.g. --filter phytophthora --filter rots)
        #[arg(long)]
        filter: Vec<String>,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// List crops with catalog data
    Crops {
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.clone())?;
    if let Some(dir) = cli.catalog_dir {
        config.catalog.dir = Some(dir);
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    agroplan::observability::init_observability(
        "agroplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    let catalog = agroplan::load_catalog(&config.catalog)?;

    let output = match cli.command {
        Commands::Plan {
            crop,
            plot,
            days,
            seed,
            format,
        } => agroplan::cli::plan_command(&config, &catalog, crop, plot, days, seed, format)?,
        Commands::Products {
            crop,
            plot,
            problem,
            filter,
            format,
        } => agroplan::cli::products_command(&catalog, crop, plot, problem, &filter, format)?,
        Commands::Crops { format } => agroplan::cli::crops_command(&catalog, format)?,
        Commands::Serve { host, port } => {
            return agroplan::cli::serve(config, catalog, host, port).await;
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
