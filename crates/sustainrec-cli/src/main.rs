//! sustainrec - material sustainability recommendations
//!
//! Usage:
//!   sustainrec serve --dataset materials.csv               # HTTP API on 127.0.0.1:8080
//!   sustainrec recommend --dataset materials.csv --recyclable true
//!   sustainrec recommend --dataset materials.csv --material bottle
//!   sustainrec similar --dataset materials.csv --material Glass \
//!       --carbon-footprint 0.85 --recyclable yes --water-usage 5 --cost 1.4
//!   sustainrec alternatives --dataset materials.csv --material PET
//!   sustainrec footprint --distance 40 --electricity 5 --food Vegan

use clap::Parser;
use std::process::ExitCode;

use sustainrec_cli::{execute_command, init_tracing, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
