//! sustainrec-cli library
//!
//! This library is the foundation for the `sustainrec` binary.
//! Exports CLI structures and the HTTP router for testing and reuse.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
pub mod error;
mod output;

pub use commands::serve::{build_router, ServerConfig, ServerState, DEFAULT_INTENSITY_URL};
pub use error::CliError;

/// sustainrec - material sustainability recommendations
///
/// Serve the recommendation API or query a dataset from the command line.
#[derive(Parser, Debug)]
#[command(name = "sustainrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP recommendation server
    Serve {
        /// Dataset CSV file
        #[arg(long, env = "SUSTAINREC_DATASET", value_name = "CSV")]
        dataset: PathBuf,

        /// Host to bind to
        #[arg(long, env = "SUSTAINREC_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "SUSTAINREC_PORT", default_value = "8080")]
        port: u16,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,

        /// Disable the Prometheus /metrics endpoint
        #[arg(long)]
        no_metrics: bool,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,

        /// Carbon-intensity endpoint proxied by GET /carbon-intensity
        #[arg(long, env = "SUSTAINREC_INTENSITY_URL", default_value = DEFAULT_INTENSITY_URL)]
        intensity_url: String,

        /// Never call the carbon-intensity endpoint
        #[arg(long)]
        offline: bool,
    },

    /// Filter the dataset by attributes, falling back to text similarity
    Recommend {
        /// Dataset CSV file
        #[arg(long, env = "SUSTAINREC_DATASET", value_name = "CSV")]
        dataset: PathBuf,

        /// Material name or substring
        #[arg(long)]
        material: Option<String>,

        /// Required recyclable flag (true/false/1/0/yes/no)
        #[arg(long)]
        recyclable: Option<String>,

        /// Required compostable flag (true/false/1/0/yes/no)
        #[arg(long)]
        compostable: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank the dataset against a feature vector
    Similar {
        /// Dataset CSV file
        #[arg(long, env = "SUSTAINREC_DATASET", value_name = "CSV")]
        dataset: PathBuf,

        /// Label echoed back with the results
        #[arg(long)]
        material: String,

        /// kg CO2e per kg
        #[arg(long)]
        carbon_footprint: f64,

        /// Recyclable flag (true/false/1/0/yes/no)
        #[arg(long)]
        recyclable: String,

        /// Litres of water per kg
        #[arg(long)]
        water_usage: f64,

        /// Relative cost
        #[arg(long)]
        cost: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List other materials in the same category
    Alternatives {
        /// Dataset CSV file
        #[arg(long, env = "SUSTAINREC_DATASET", value_name = "CSV")]
        dataset: PathBuf,

        /// Exact material name (case-insensitive)
        #[arg(long)]
        material: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate a personal carbon footprint
    Footprint {
        /// km driven
        #[arg(long)]
        distance: f64,

        /// kWh consumed
        #[arg(long)]
        electricity: f64,

        /// Vegan, Vegetarian, "Mixed (Meat & Veg)" or Meat-heavy
        #[arg(long)]
        food: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Install the global `tracing` subscriber.
///
/// With no `-v` flag `RUST_LOG` decides, defaulting to `warn`.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the parsed command
pub fn execute_command(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Serve {
            dataset,
            host,
            port,
            no_cors,
            no_metrics,
            timeout_secs,
            intensity_url,
            offline,
        } => {
            let config = ServerConfig::default()
                .with_host(host.clone())
                .with_port(*port)
                .with_cors(!no_cors)
                .with_metrics(!no_metrics)
                .with_timeout_secs(*timeout_secs)
                .with_intensity_url(intensity_url.clone())
                .with_offline(*offline);
            commands::serve::run(dataset, &config)
        }

        Commands::Recommend {
            dataset,
            material,
            recyclable,
            compostable,
            json,
        } => commands::recommend::run(
            dataset,
            material.as_deref(),
            recyclable.as_deref(),
            compostable.as_deref(),
            *json || cli.json,
        ),

        Commands::Similar {
            dataset,
            material,
            carbon_footprint,
            recyclable,
            water_usage,
            cost,
            json,
        } => commands::similar::run(
            dataset,
            material,
            *carbon_footprint,
            recyclable,
            *water_usage,
            *cost,
            *json || cli.json,
        ),

        Commands::Alternatives {
            dataset,
            material,
            json,
        } => commands::recommend::run_alternatives(dataset, material, *json || cli.json),

        Commands::Footprint {
            distance,
            electricity,
            food,
            json,
        } => commands::footprint::run(*distance, *electricity, food, *json || cli.json),
    }
}
