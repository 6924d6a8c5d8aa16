//! Serve command - expose the cleaning pipeline over HTTP.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use colored::Colorize;

use super::{build_scrub, load_session};
use crate::cli::InputArgs;
use crate::server::{app, state::AppState};

pub fn run(
    file: Option<PathBuf>,
    host: IpAddr,
    port: u16,
    input: InputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let scrub = build_scrub(&input, None);

    let session = match file {
        Some(ref path) => Some(load_session(&scrub, path, false)?),
        None => None,
    };

    let state = AppState::new(scrub, session);
    let addr = SocketAddr::new(host, port);

    println!(
        "{} {}",
        "Starting server at".cyan().bold(),
        format!("http://{}", addr).white().bold()
    );
    println!();
    if let Some(path) = file {
        println!("  File: {}", path.display());
    } else {
        println!("  Upload a CSV with: curl --data-binary @data.csv http://{}/api/upload", addr);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, addr))
}
