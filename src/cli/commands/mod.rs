//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `account`: login, signup, logout, profile and likes
//! - `library`: song library listing and search
//! - `recommend`: the three recommendation queries
//! - `settings`: config file inspection
//!
//! Every command builds a [`Store`] from the config and the saved session,
//! runs one operation, waits for background work and prints what is left in
//! the toast queue.

mod account;
mod library;
mod recommend;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::api::ApiClient;
use crate::config::{self, BASE_URL_ENV, Config};
use crate::error::{Result, ResultExt};
use crate::session::FileTokenStore;
use crate::store::{Store, StoreOptions};

pub use account::{cmd_like, cmd_likes, cmd_login, cmd_logout, cmd_me, cmd_signup, cmd_unlike};
pub use library::cmd_songs;
pub use recommend::{cmd_recommend_audio, cmd_recommend_for_me, cmd_recommend_name};
pub use settings::cmd_config;

/// Music Discovery CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = BASE_URL_ENV, global = true)]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List the song library
    Songs {
        /// Only show songs whose title or artist contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Password (or set MUSIC_DISCOVERY_PASSWORD)
        #[arg(long, env = "MUSIC_DISCOVERY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        /// Password (or set MUSIC_DISCOVERY_PASSWORD)
        #[arg(long, env = "MUSIC_DISCOVERY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Me,
    /// List liked songs
    Likes,
    /// Like a song
    Like {
        /// Track name
        track: String,
    },
    /// Remove a like
    Unlike {
        /// Track name
        track: String,
    },
    /// Get recommendations
    Recommend {
        #[command(subcommand)]
        query: RecommendQuery,
    },
    /// Show the active configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        show_path: bool,
        /// Write the active configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Recommendation query kinds
#[derive(Subcommand)]
pub enum RecommendQuery {
    /// Songs similar to a track in the library
    Name {
        /// Track name
        song: String,
    },
    /// Songs similar to an audio file
    Audio {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Personalized picks based on your likes
    ForMe {
        /// Number of recommendations (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.api_base_url.as_deref());

    if let Commands::Config { show_path, init } = &cli.command {
        return cmd_config(&config, *show_path, *init);
    }

    let rt = Runtime::new()?;
    let store = build_store(&config)?;

    match &cli.command {
        Commands::Songs { search } => cmd_songs(&rt, &store, search.as_deref()),
        Commands::Login { email, password } => cmd_login(&rt, &store, email, password),
        Commands::Signup { email, password } => cmd_signup(&rt, &store, email, password),
        Commands::Logout => cmd_logout(&store),
        Commands::Me => cmd_me(&rt, &store),
        Commands::Likes => cmd_likes(&rt, &store),
        Commands::Like { track } => cmd_like(&rt, &store, track),
        Commands::Unlike { track } => cmd_unlike(&rt, &store, track),
        Commands::Recommend { query } => match query {
            RecommendQuery::Name { song } => cmd_recommend_name(&rt, &store, song),
            RecommendQuery::Audio { path } => cmd_recommend_audio(&rt, &store, path),
            RecommendQuery::ForMe { count } => cmd_recommend_for_me(&rt, &store, *count),
        },
        Commands::Config { .. } => Ok(()),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Config file plus environment, with the command-line URL on top
pub(crate) fn load_config(api_base_url: Option<&str>) -> Config {
    let mut config = config::load().with_env_overrides();
    if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.to_string();
    }
    config
}

/// Wire the HTTP client, the saved session and the store together.
///
/// The client is created first; the store's credential provider is installed
/// afterwards so every request reads the live token.
pub(crate) fn build_store(config: &Config) -> Result<Store> {
    let client = Arc::new(
        ApiClient::new(&config.api.base_url, config.api.timeout())
            .with_context("Creating HTTP client")?,
    );
    let tokens = Arc::new(FileTokenStore::in_config_dir().with_context("Opening session file")?);
    tracing::debug!(base_url = %client.base_url(), session = ?tokens.path(), "Building store");

    let store = Store::new(client.clone(), tokens, StoreOptions::from(config));
    client.install_credentials(store.credential_provider());
    Ok(store)
}

/// Print toasts that are still visible, oldest first
pub(crate) fn print_toasts(store: &Store) {
    store.expire_toasts();
    store.read(|state| {
        for toast in state.toasts.visible(Instant::now()) {
            eprintln!("[{}] {}", toast.level.tag(), toast.message);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend_for_me() {
        let cli = Cli::try_parse_from(["music-discovery", "recommend", "for-me", "-n", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Recommend {
                query: RecommendQuery::ForMe { count: Some(5) }
            }
        ));
    }

    #[test]
    fn test_parse_global_base_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "music-discovery",
            "songs",
            "--search",
            "miles",
            "--api-base-url",
            "http://api.test",
        ])
        .unwrap();
        assert_eq!(cli.api_base_url.as_deref(), Some("http://api.test"));
        assert!(matches!(cli.command, Commands::Songs { search: Some(ref s) } if s == "miles"));
    }

    #[test]
    fn test_command_line_url_wins() {
        let config = load_config(Some(" http://cli.test "));
        assert_eq!(config.api.base_url, "http://cli.test");
    }
}
