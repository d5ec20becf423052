//! Recommendation API server
//!
//! Loads the dataset once, builds the text index, then serves:
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | liveness message |
//! | `GET /health` | dataset and uptime status |
//! | `GET /metrics` | Prometheus counters (optional) |
//! | `GET /recommend` | attribute filter with text-similarity fallback |
//! | `POST /recommend` | feature-vector ranking |
//! | `GET /alternatives` | same-category materials |
//! | `POST /calculate` | personal carbon footprint |
//! | `GET /carbon-intensity` | proxied grid carbon intensity |

pub mod intensity;
pub mod routes;
pub mod types;

pub use routes::build_router;
pub use types::*;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use sustainrec::recommend::{Recommender, RecommenderConfig};

use crate::error::{CliError, Result};

/// Serve command entry point (blocking)
pub(crate) fn run(dataset: &Path, config: &ServerConfig) -> Result<()> {
    println!("{}", "=== sustainrec serve ===".cyan().bold());
    println!();
    println!("Dataset: {}", dataset.display());
    println!("Binding: {}", config.bind_addr());
    println!();

    // A broken dataset degrades to an empty table instead of aborting startup.
    let recommender = Recommender::from_csv_or_empty(dataset, RecommenderConfig::default());
    let records = recommender.table().len();
    if records == 0 {
        println!(
            "{}",
            "Dataset empty or unreadable: serving empty results".yellow()
        );
    } else {
        println!(
            "{}",
            format!(
                "Loaded {records} records, text index {}",
                if recommender.index().is_some() { "ready" } else { "absent" }
            )
            .dimmed()
        );
    }

    let state = Arc::new(ServerState::new(recommender, config.clone()));
    print_endpoints(config);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Server(format!("Failed to create runtime: {e}")))?;

    let bind_addr = config.bind_addr();
    runtime.block_on(async move {
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind {bind_addr}: {e}")))?;

        tracing::info!(addr = %bind_addr, "listening");
        println!();
        println!(
            "{}",
            format!("Server ready at http://{bind_addr}").green().bold()
        );
        println!("{}", "Press Ctrl+C to stop".dimmed());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CliError::Server(format!("Server error: {e}")))?;

        println!();
        println!("{}", "Server stopped".yellow());
        Ok(())
    })
}

fn print_endpoints(config: &ServerConfig) {
    println!();
    println!("{}", "Endpoints:".green().bold());
    println!("  GET  /                  - Liveness message");
    println!("  GET  /health            - Health check");
    println!("  GET  /recommend         - Filter by material_type/recyclable/compostable");
    println!("  POST /recommend         - Rank by feature vector");
    println!("  GET  /alternatives      - Same-category materials");
    println!("  POST /calculate         - Carbon footprint calculator");
    if config.offline {
        println!("  GET  /carbon-intensity  - {}", "disabled (offline)".dimmed());
    } else {
        println!("  GET  /carbon-intensity  - Grid carbon intensity");
    }
    if config.metrics {
        println!("  GET  /metrics           - Prometheus metrics");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
