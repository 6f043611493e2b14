//! Command-line interface for music-discovery.
//!
//! This module provides CLI commands for browsing the song library, managing
//! the session and requesting recommendations from the backend.

mod commands;

pub use commands::{Cli, Commands, RecommendQuery, run_command};
