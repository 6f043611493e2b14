//! Test utilities and fixtures for music-discovery tests.
//!
//! This module provides store harnesses wired to the scripted backend and
//! a file-backed token store in a temporary directory.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::harness;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let h = harness(MockScript::default());
//!     h.store.load_library(false).await.unwrap();
//!     assert_eq!(h.api.call_count("songs"), 1);
//! }
//! ```

use std::sync::Arc;

use tempfile::TempDir;

use crate::api::traits::mocks::{MockBackend, MockScript};
use crate::config::ResponseOrdering;
use crate::session::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::store::{Store, StoreOptions};

/// A store plus handles to the fakes behind it
pub struct Harness {
    pub store: Store,
    pub api: Arc<MockBackend>,
    pub tokens: Arc<MemoryTokenStore>,
}

/// Anonymous store with default options.
pub fn harness(script: MockScript) -> Harness {
    harness_with(script, MemoryTokenStore::new(), ResponseOrdering::LastResolved)
}

/// Store with a given token store and response ordering.
pub fn harness_with(
    script: MockScript,
    tokens: MemoryTokenStore,
    ordering: ResponseOrdering,
) -> Harness {
    let api = Arc::new(MockBackend::with_script(script));
    let tokens = Arc::new(tokens);
    let options = StoreOptions {
        ordering,
        ..StoreOptions::default()
    };
    let store = Store::new(api.clone(), tokens.clone(), options);
    Harness { store, api, tokens }
}

/// Creates a file-backed token store in a temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn temp_token_store() -> (Arc<FileTokenStore>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = FileTokenStore::new(dir.path().join("session.toml"));
    (Arc::new(store), dir)
}

/// Builds a store over `api` that persists its token in `tokens`.
pub fn store_with(api: Arc<MockBackend>, tokens: Arc<dyn TokenStore>) -> Store {
    Store::new(api, tokens, StoreOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Credentials;

    #[tokio::test]
    async fn test_session_survives_restart() {
        let (tokens, _dir) = temp_token_store();
        let api = Arc::new(MockBackend::new());

        let first = store_with(api.clone(), tokens.clone());
        first.login(Credentials::new("u@x.com", "pw")).await.unwrap();
        first.settle().await;

        // A fresh store over the same file starts authenticated
        let second = store_with(api.clone(), tokens.clone());
        assert_eq!(second.snapshot().auth.token.as_deref(), Some("tok123"));
        assert!(second.read(|s| s.auth.is_profile_pending()));

        second.logout();
        let third = store_with(api, tokens);
        assert!(!third.read(|s| s.auth.is_authenticated()));
    }

    #[test]
    fn test_harness_starts_anonymous() {
        let h = harness(MockScript::default());
        assert!(!h.store.read(|s| s.auth.is_authenticated()));
        assert!(h.api.calls().is_empty());
    }
}
