//! Scrub CLI - toggleable cleaning pipeline for CSV data.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            format,
            json,
            stages,
            input,
        } => commands::clean::run(file, output, format, json, stages, input),

        Commands::Preview {
            file,
            rows,
            stages,
            input,
        } => commands::preview::run(file, rows, stages, input),

        Commands::Chart {
            file,
            kind,
            column,
            y,
            json,
            stages,
            input,
        } => commands::chart::run(file, kind, column, y, json, stages, input),

        Commands::Serve {
            file,
            host,
            port,
            input,
        } => commands::serve::run(file, host, port, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "scrub=debug,scrub_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
