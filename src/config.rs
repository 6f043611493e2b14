//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-discovery\config.toml
//! - macOS: ~/Library/Application Support/music-discovery/config.toml
//! - Linux: ~/.config/music-discovery/config.toml
//!
//! The config file is human-readable and editable. The backend base URL can
//! also be supplied through `MUSIC_DISCOVERY_API_BASE_URL`, which wins over
//! the file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding `[api] base_url`
pub const BASE_URL_ENV: &str = "MUSIC_DISCOVERY_API_BASE_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection
    pub api: ApiConfig,

    /// Song library browsing
    pub library: LibraryConfig,

    /// Recommendation queries
    pub recommendations: RecommendationsConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the recommendation backend
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Library settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// How long a fetched library is reused before refetching
    pub stale_after_secs: u64,

    /// Quiet period after the last keystroke before the filter applies
    pub search_debounce_ms: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: 30 * 60,
            search_debounce_ms: 300,
        }
    }
}

impl LibraryConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Recommendation query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationsConfig {
    /// Count requested by "for you" queries when none is given
    pub default_count: u32,

    /// Which result wins when queries overlap
    pub ordering: ResponseOrdering,
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self {
            default_count: 10,
            ordering: ResponseOrdering::default(),
        }
    }
}

/// Policy for overlapping recommendation queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Apply every response as it arrives; the last one to resolve wins
    #[default]
    LastResolved,
    /// Drop responses to queries older than the most recently issued one
    LatestIssued,
}

impl Config {
    /// Apply environment overrides (currently only the base URL)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api.base_url = url.trim().to_string();
        }
        self
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-discovery"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults
pub fn load_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[library]"));
        assert!(toml.contains("[recommendations]"));
        assert!(toml.contains("ordering = \"last_resolved\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.api.base_url = "https://recs.example.com".to_string();
        config.recommendations.ordering = ResponseOrdering::LatestIssued;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        save_to(&config, &path).unwrap();
        let parsed = load_from(&path);

        assert_eq!(parsed.api.base_url, "https://recs.example.com");
        assert_eq!(parsed.recommendations.ordering, ResponseOrdering::LatestIssued);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[api]
base_url = "http://10.0.0.2:8000"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.library.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.library.stale_after(), Duration::from_secs(1800));
        assert_eq!(config.recommendations.default_count, 10);
        assert_eq!(config.recommendations.ordering, ResponseOrdering::LastResolved);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let api = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(api.timeout(), Duration::from_secs(1));
    }
}
