//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`ApiError`], [`OperationError`], [`SessionError`], [`ConfigError`]),
//! while the CLI uses `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use music_discovery::error::{Result, ResultExt};
//!
//! async fn read_upload(path: &Path) -> Result<AudioUpload> {
//!     AudioUpload::from_path(path)
//!         .await
//!         .with_context(format!("Reading {}", path.display()))
//! }
//! ```

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::SessionError;
use crate::store::OperationError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend transport or protocol error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A store operation failed; the message is already user-facing
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// Session token storage error
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ApiError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Api(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, SessionError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Session(e).context(ctx))
    }
}
