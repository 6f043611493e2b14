//! Process-wide client state.
//!
//! The [`Store`] owns the auth, recommendations and library slices plus the
//! toast queue. State lives in a `tokio::sync::watch` channel:
//! - every [`Message`] is applied atomically through `send_modify`, so
//!   subscribers never see half an update
//! - [`Store::subscribe`] hands out receivers that are notified on change
//! - [`Store::credential_provider`] reads the live token for the HTTP client
//!
//! Async operations (`login`, `query_by_name`, ...) live in `effects` and are
//! methods on `Store`.
//!
//! # Response ordering
//!
//! By default recommendation results are applied in the order they resolve,
//! so an older query that answers late overwrites a newer one. With
//! [`ResponseOrdering::LatestIssued`] every query takes a request id and
//! results older than the latest issued query are dropped.

mod effects;
pub mod messages;
pub mod state;
pub mod toast;
pub mod update;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ApiError, CredentialProvider, DiscoveryApi};
use crate::config::{Config, ResponseOrdering};
use crate::library::Debouncer;
use crate::session::TokenStore;

pub use effects::QueryOutcome;
pub use messages::{Message, QueryKind};
pub use state::{AppState, AuthState, LibraryState, LikeStatus, RecommendationsState, RequestStatus};
pub use toast::{Toast, ToastLevel};

/// Tuning knobs taken from [`Config`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub ordering: ResponseOrdering,
    pub default_count: u32,
    pub library_stale_after: Duration,
    pub search_debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            ordering: config.recommendations.ordering,
            default_count: config.recommendations.default_count,
            library_stale_after: config.library.stale_after(),
            search_debounce: config.library.search_debounce(),
        }
    }
}

/// Failure of a store operation, already reduced to a user-facing message
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// The backend call failed; `message` is the detail or the fallback text
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("You need to log in first")]
    NotLoggedIn,

    #[error("A like is already in progress")]
    LikeInProgress,
}

impl OperationError {
    pub(crate) fn from_api(source: ApiError, fallback: &str) -> Self {
        Self::Failed {
            message: source.user_message(fallback),
            source,
        }
    }

    /// The text to show the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Monotonic ids for recommendation queries
#[derive(Default)]
struct RequestFence {
    latest: AtomicU64,
}

impl RequestFence {
    fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, id: u64) -> bool {
        id < self.latest.load(Ordering::SeqCst)
    }
}

struct Inner {
    state: watch::Sender<AppState>,
    api: Arc<dyn DiscoveryApi>,
    tokens: Arc<dyn TokenStore>,
    options: StoreOptions,
    fence: RequestFence,
    search: Debouncer,
    background: Mutex<Vec<JoinHandle<()>>>,
}

/// Shared handle to the client state. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Create a store, restoring any session token persisted in `tokens`.
    pub fn new(
        api: Arc<dyn DiscoveryApi>,
        tokens: Arc<dyn TokenStore>,
        options: StoreOptions,
    ) -> Self {
        let token = tokens.load();
        if token.is_some() {
            tracing::info!("Restored saved session");
        }
        let (state, _) = watch::channel(AppState::new(token));

        Self {
            inner: Arc::new(Inner {
                state,
                api,
                tokens,
                search: Debouncer::new(options.search_debounce),
                options,
                fence: RequestFence::default(),
                background: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Receiver notified after every applied message
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    /// Token source for [`ApiClient::install_credentials`](crate::api::ApiClient::install_credentials).
    ///
    /// Reads the token at call time, so it follows login and logout.
    pub fn credential_provider(&self) -> CredentialProvider {
        let state = self.subscribe();
        Arc::new(move || state.borrow().auth.token.clone())
    }

    /// Apply a message to the state and notify subscribers
    pub fn dispatch(&self, message: impl Into<Message>) {
        let message = message.into();
        tracing::debug!(?message, "dispatch");
        self.inner
            .state
            .send_modify(|state| update::update(state, message));
    }

    /// Push a toast notification
    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        self.dispatch(messages::ToastMessage::Pushed(Toast::new(level, message)));
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.dispatch(messages::ToastMessage::Dismissed(id));
    }

    /// Drop toasts that have outlived their display time
    pub fn expire_toasts(&self) {
        self.dispatch(messages::ToastMessage::Expired(std::time::Instant::now()));
    }

    /// Run `task` in the background; [`Store::settle`] waits for it.
    pub(crate) fn spawn_background<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        self.track(handle);
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut background = self.inner.background.lock();
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }

    /// Wait until every background task (including ones they start) is done.
    pub async fn settle(&self) {
        loop {
            let pending = std::mem::take(&mut *self.inner.background.lock());
            if pending.is_empty() {
                break;
            }
            for result in futures::future::join_all(pending).await {
                if let Err(e) = result {
                    tracing::warn!("Background task failed: {}", e);
                }
            }
        }
    }

    /// Start a query: issue its request id and apply the pending transition
    /// in one step.
    fn begin_query(&self, kind: QueryKind) -> u64 {
        let mut id = 0;
        let fence = &self.inner.fence;
        self.inner.state.send_modify(|state| {
            id = fence.issue();
            update::update(
                state,
                messages::RecommendationsMessage::QueryStarted(kind).into(),
            );
        });
        id
    }

    /// Mark a like as in flight unless one already is, in one step.
    fn begin_like(&self) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.recommendations.like_status == LikeStatus::Loading {
                return false;
            }
            update::update(state, messages::RecommendationsMessage::LikeStarted.into());
            true
        })
    }

    /// Apply a query's outcome unless the ordering policy says it is stale.
    fn finish_query(&self, id: u64, message: messages::RecommendationsMessage) -> bool {
        let ordering = self.inner.options.ordering;
        let fence = &self.inner.fence;
        let applied = self.inner.state.send_if_modified(|state| {
            if ordering == ResponseOrdering::LatestIssued && fence.is_stale(id) {
                return false;
            }
            update::update(state, message.into());
            true
        });
        if !applied {
            tracing::debug!(request = id, "Discarding superseded recommendation response");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::mocks::MockBackend;
    use crate::session::MemoryTokenStore;

    fn store_with_token(token: Option<&str>) -> Store {
        let tokens = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        Store::new(
            Arc::new(MockBackend::new()),
            Arc::new(tokens),
            StoreOptions::default(),
        )
    }

    #[test]
    fn test_restores_persisted_token() {
        let store = store_with_token(Some("saved"));
        assert_eq!(store.snapshot().auth.token.as_deref(), Some("saved"));

        let store = store_with_token(None);
        assert!(!store.read(|s| s.auth.is_authenticated()));
    }

    #[test]
    fn test_credential_provider_follows_state() {
        let store = store_with_token(None);
        let provider = store.credential_provider();
        assert_eq!(provider(), None);

        store.dispatch(messages::AuthMessage::LoginSucceeded {
            token: "fresh".to_string(),
        });
        assert_eq!(provider().as_deref(), Some("fresh"));

        store.dispatch(messages::AuthMessage::LoggedOut);
        assert_eq!(provider(), None);
    }

    #[tokio::test]
    async fn test_subscribers_notified() {
        let store = store_with_token(None);
        let mut rx = store.subscribe();
        let _ = rx.borrow_and_update();

        store.notify(ToastLevel::Info, "hello");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().toasts.len(), 1);
    }

    #[test]
    fn test_dismiss_toast() {
        let store = store_with_token(None);
        store.notify(ToastLevel::Success, "first");
        store.notify(ToastLevel::Error, "second");
        let first = store.read(|s| s.toasts.visible(std::time::Instant::now()).next().map(|t| t.id));

        store.dismiss_toast(first.unwrap());
        let remaining: Vec<_> = store.read(|s| {
            s.toasts
                .visible(std::time::Instant::now())
                .map(|t| t.message.clone())
                .collect()
        });
        assert_eq!(remaining, vec!["second"]);
    }

    #[test]
    fn test_fence() {
        let fence = RequestFence::default();
        let first = fence.issue();
        let second = fence.issue();
        assert!(fence.is_stale(first));
        assert!(!fence.is_stale(second));
    }

    #[test]
    fn test_begin_like_refuses_second_like() {
        let store = store_with_token(Some("tok"));
        assert!(store.begin_like());
        assert!(!store.begin_like());
        assert_eq!(store.read(|s| s.recommendations.likes_in_flight), 1);

        store.dispatch(messages::RecommendationsMessage::LikeSettled);
        assert!(store.begin_like());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.recommendations.ordering = ResponseOrdering::LatestIssued;
        config.library.search_debounce_ms = 50;

        let options = StoreOptions::from(&config);
        assert_eq!(options.ordering, ResponseOrdering::LatestIssued);
        assert_eq!(options.search_debounce, Duration::from_millis(50));
        assert_eq!(options.default_count, 10);
    }

    #[test]
    fn test_operation_error_message() {
        let err = OperationError::from_api(ApiError::Network("refused".into()), "Login failed");
        assert_eq!(err.message(), "Login failed");
    }
}
