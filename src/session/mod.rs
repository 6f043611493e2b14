//! Durable storage for the session token.
//!
//! The token is the only client state that survives a restart. It is kept
//! under the single key `token` in `session.toml` next to the config file:
//!
//! ```toml
//! token = "eyJhbGciOi..."
//! saved_at = "2026-01-01T12:00:00+00:00"
//! ```
//!
//! Absence of the file (or of the key) means "anonymous".

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Where the session token lives between runs.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token. Unreadable storage counts as no token.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous one.
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the persisted token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session file errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create session directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write session file {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to remove session file {0}: {1}")]
    Remove(PathBuf, std::io::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    token: Option<String>,
    saved_at: Option<String>,
}

/// Token store backed by a TOML file
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the OS config directory (`<config>/music-discovery/session.toml`)
    pub fn in_config_dir() -> Result<Self, SessionError> {
        let dir = crate::config::config_dir().ok_or(SessionError::NoConfigDir)?;
        Ok(Self::new(dir.join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session file {:?}: {}", self.path, e);
                return None;
            }
        };

        match toml::from_str::<SessionFile>(&contents) {
            Ok(file) => file.token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Ignoring malformed session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| SessionError::CreateDir(dir.to_path_buf(), e))?;
        }

        let file = SessionFile {
            token: Some(token.to_string()),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        let contents = toml::to_string_pretty(&file)?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&temp_path, &contents)
            .and_then(|()| restrict_to_owner(&temp_path))
            .map_err(|e| SessionError::Write(temp_path.clone(), e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| SessionError::Write(self.path.clone(), e))?;

        tracing::debug!("Saved session token to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Remove(self.path.clone(), e)),
        }
    }
}

/// The session file holds a bearer token; keep it owner-only.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// In-process token store, used by tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already persisted
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock() = None;
        Ok(())
    }
}
