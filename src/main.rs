//! Music Discovery - a client for a music recommendation service.
//!
//! Browse the song library, log in, like songs and ask the backend for
//! recommendations by song name, by uploaded audio or from your likes.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod session;
pub mod store;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout is left to command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("music_discovery=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
