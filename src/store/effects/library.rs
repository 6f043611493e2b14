//! Song library loading and the debounced filter.

use std::time::Instant;

use crate::store::messages::LibraryMessage;
use crate::store::{OperationError, Store};

const LIBRARY_FAILED: &str = "Error loading songs";

impl Store {
    /// Fetch the song library.
    ///
    /// Skipped while the last successful load is younger than the configured
    /// staleness window, unless `force` is set. Returns whether a fetch ran.
    pub async fn load_library(&self, force: bool) -> Result<bool, OperationError> {
        let max_age = self.inner.options.library_stale_after;
        if !force && self.read(|s| s.library.is_fresh(Instant::now(), max_age)) {
            tracing::debug!("Library is fresh, skipping fetch");
            return Ok(false);
        }

        self.dispatch(LibraryMessage::LoadStarted);
        match self.inner.api.list_songs().await {
            Ok(songs) => {
                tracing::info!(count = songs.len(), "Loaded song library");
                self.dispatch(LibraryMessage::Loaded {
                    songs,
                    at: Instant::now(),
                });
                Ok(true)
            }
            Err(e) => {
                let err = OperationError::from_api(e, LIBRARY_FAILED);
                tracing::warn!("Library load failed: {}", err);
                self.dispatch(LibraryMessage::LoadFailed(err.message()));
                Err(err)
            }
        }
    }

    /// Update the filter text. The filter itself applies after a quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_library_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.dispatch(LibraryMessage::QueryChanged(query.clone()));

        let store = self.clone();
        let handle = self
            .inner
            .search
            .call(move || store.dispatch(LibraryMessage::QueryApplied(query)));
        self.track(handle);
    }
}
