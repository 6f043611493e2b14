//! Session operations: login, signup, profile and like-list sync, logout.

use crate::model::{Credentials, SongInfo, User};
use crate::store::messages::AuthMessage;
use crate::store::{OperationError, Store, ToastLevel};

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const PROFILE_FAILED: &str = "Could not fetch user profile";
const LIKES_FAILED: &str = "Could not fetch liked songs";
const UNLIKE_FAILED: &str = "Could not unlike song";

impl Store {
    /// Log in and persist the session token.
    ///
    /// Profile and likes are fetched in the background afterwards; their
    /// failures are surfaced as toasts but never undo the login.
    pub async fn login(&self, credentials: Credentials) -> Result<(), OperationError> {
        self.dispatch(AuthMessage::LoginStarted);

        let grant = match self.inner.api.login(&credentials).await {
            Ok(grant) => grant,
            Err(e) => {
                let err = OperationError::from_api(e, LOGIN_FAILED);
                tracing::warn!(email = %credentials.email, "Login failed: {}", err);
                self.dispatch(AuthMessage::LoginFailed(err.message()));
                return Err(err);
            }
        };

        self.dispatch(AuthMessage::LoginSucceeded {
            token: grant.access_token.clone(),
        });
        if let Err(e) = self.inner.tokens.save(&grant.access_token) {
            // The in-memory session still works; it just won't survive a restart
            tracing::warn!("Failed to persist session token: {}", e);
        }
        tracing::info!(email = %credentials.email, "Logged in");

        let store = self.clone();
        self.spawn_background(async move {
            if let Err(e) = store.fetch_profile().await {
                store.notify(ToastLevel::Error, e.message());
            }
        });
        let store = self.clone();
        self.spawn_background(async move {
            if let Err(e) = store.fetch_likes().await {
                store.notify(ToastLevel::Error, e.message());
            }
        });

        Ok(())
    }

    /// Create an account. Does not log in.
    pub async fn signup(&self, credentials: Credentials) -> Result<(), OperationError> {
        self.dispatch(AuthMessage::SignupStarted);

        match self.inner.api.signup(&credentials).await {
            Ok(()) => {
                tracing::info!(email = %credentials.email, "Account created");
                self.dispatch(AuthMessage::SignupSucceeded);
                Ok(())
            }
            Err(e) => {
                let err = OperationError::from_api(e, SIGNUP_FAILED);
                self.dispatch(AuthMessage::SignupFailed(err.message()));
                Err(err)
            }
        }
    }

    /// Refresh the profile. A failure leaves the current user and session alone.
    pub async fn fetch_profile(&self) -> Result<User, OperationError> {
        match self.inner.api.me().await {
            Ok(user) => {
                self.dispatch(AuthMessage::ProfileLoaded(user.clone()));
                Ok(user)
            }
            Err(e) => {
                let err = OperationError::from_api(e, PROFILE_FAILED);
                tracing::warn!("Profile fetch failed: {}", err);
                Err(err)
            }
        }
    }

    /// Replace the liked songs with the server's list.
    pub async fn fetch_likes(&self) -> Result<Vec<SongInfo>, OperationError> {
        match self.inner.api.my_likes().await {
            Ok(songs) => {
                self.dispatch(AuthMessage::LikesLoaded(songs.clone()));
                Ok(songs)
            }
            Err(e) => {
                let err = OperationError::from_api(e, LIKES_FAILED);
                tracing::warn!("Likes fetch failed: {}", err);
                Err(err)
            }
        }
    }

    /// Remove a like on the server, then resync the like list.
    ///
    /// The list is refetched whether or not the removal succeeded; nothing is
    /// removed locally.
    pub async fn unlike(&self, track_name: &str) -> Result<(), OperationError> {
        let result = self.inner.api.unlike(track_name).await;

        if let Err(e) = self.fetch_likes().await {
            tracing::warn!("Like list resync after unlike failed: {}", e);
        }

        result.map_err(|e| OperationError::from_api(e, UNLIKE_FAILED))
    }

    /// Forget the session. Never fails.
    pub fn logout(&self) {
        self.dispatch(AuthMessage::LoggedOut);
        if let Err(e) = self.inner.tokens.clear() {
            tracing::warn!("Failed to remove persisted session token: {}", e);
        }
        tracing::info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use crate::api::traits::mocks::{MockScript, detail_error};
    use crate::config::ResponseOrdering;
    use crate::model::{Credentials, SongInfo};
    use crate::session::{MemoryTokenStore, TokenStore};
    use crate::store::{RequestStatus, ToastLevel};
    use crate::test_utils::{harness, harness_with};

    fn credentials() -> Credentials {
        Credentials::new("u@x.com", "secret")
    }

    #[tokio::test]
    async fn test_login_stores_token_and_fetches_in_background() {
        let h = harness(MockScript {
            likes: vec![SongInfo::new("Naima", "John Coltrane")],
            ..Default::default()
        });

        h.store.login(credentials()).await.unwrap();

        let state = h.store.snapshot();
        assert_eq!(state.auth.status, RequestStatus::Succeeded);
        assert_eq!(state.auth.token.as_deref(), Some("tok123"));
        assert_eq!(h.tokens.load().as_deref(), Some("tok123"));

        h.store.settle().await;
        let calls = h.api.calls();
        assert_eq!(calls[0], "login:u@x.com");
        assert_eq!(h.api.call_count("me"), 1);
        assert_eq!(h.api.call_count("likes"), 1);

        let state = h.store.snapshot();
        assert_eq!(state.auth.user.as_ref().map(|u| u.email.as_str()), Some("u@x.com"));
        assert_eq!(state.auth.liked_songs, vec![SongInfo::new("Naima", "John Coltrane")]);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_unset() {
        let h = harness(MockScript {
            login: Err(detail_error("Incorrect email or password")),
            ..Default::default()
        });

        let err = h.store.login(credentials()).await.unwrap_err();
        assert_eq!(err.message(), "Incorrect email or password");
        h.store.settle().await;

        let state = h.store.snapshot();
        assert_eq!(state.auth.status, RequestStatus::Failed);
        assert_eq!(state.auth.error.as_deref(), Some("Incorrect email or password"));
        assert_eq!(state.auth.token, None);
        assert_eq!(state.auth.user, None);
        assert!(state.auth.liked_songs.is_empty());
        assert_eq!(h.tokens.load(), None);
        assert_eq!(h.api.call_count("me"), 0);
    }

    #[tokio::test]
    async fn test_failed_login_falls_back_to_generic_message() {
        let h = harness(MockScript {
            login: Err(crate::api::ApiError::Network("refused".to_string())),
            ..Default::default()
        });
        let err = h.store.login(credentials()).await.unwrap_err();
        assert_eq!(err.message(), "Login failed");
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let h = harness_with(
            MockScript {
                login: Err(detail_error("nope")),
                ..Default::default()
            },
            MemoryTokenStore::with_token("old"),
            ResponseOrdering::LastResolved,
        );

        let _ = h.store.login(credentials()).await;
        assert_eq!(h.store.snapshot().auth.token.as_deref(), Some("old"));
        assert_eq!(h.tokens.load().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_background_failures_keep_session() {
        let h = harness(MockScript {
            me: Err(detail_error("Profile service down")),
            likes_error: Some(crate::api::ApiError::Network("timeout".to_string())),
            ..Default::default()
        });

        h.store.login(credentials()).await.unwrap();
        h.store.settle().await;

        let state = h.store.snapshot();
        assert!(state.auth.is_authenticated());
        assert!(state.auth.is_profile_pending());
        assert!(state.auth.liked_songs.is_empty());

        let toasts: Vec<_> = state
            .toasts
            .visible(std::time::Instant::now())
            .map(|t| (t.level, t.message.clone()))
            .collect();
        assert!(toasts.contains(&(ToastLevel::Error, "Profile service down".to_string())));
        assert!(toasts.contains(&(ToastLevel::Error, "Could not fetch liked songs".to_string())));
    }

    #[tokio::test]
    async fn test_signup_does_not_log_in() {
        let h = harness(MockScript::default());
        h.store.signup(credentials()).await.unwrap();

        let state = h.store.snapshot();
        assert_eq!(state.auth.status, RequestStatus::Succeeded);
        assert!(!state.auth.is_authenticated());
        assert_eq!(h.api.calls(), vec!["signup:u@x.com"]);
    }

    #[tokio::test]
    async fn test_signup_failure_uses_shared_error_slot() {
        let h = harness(MockScript {
            signup: Err(detail_error("Email already registered")),
            ..Default::default()
        });
        let err = h.store.signup(credentials()).await.unwrap_err();

        assert_eq!(err.message(), "Email already registered");
        let state = h.store.snapshot();
        assert_eq!(state.auth.status, RequestStatus::Failed);
        assert_eq!(state.auth.error.as_deref(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn test_profile_failure_keeps_user() {
        let h = harness(MockScript::default());
        h.store.fetch_profile().await.unwrap();

        h.api.script.lock().me = Err(detail_error("Not authenticated"));
        let err = h.store.fetch_profile().await.unwrap_err();

        assert_eq!(err.message(), "Not authenticated");
        assert!(h.store.snapshot().auth.user.is_some());
    }

    #[tokio::test]
    async fn test_unlike_resyncs_from_server() {
        let h = harness(MockScript {
            likes: vec![SongInfo::new("S1", "a"), SongInfo::new("S2", "b")],
            ..Default::default()
        });
        h.store.fetch_likes().await.unwrap();
        assert_eq!(h.store.snapshot().auth.liked_songs.len(), 2);

        h.store.unlike("S1").await.unwrap();

        let liked = h.store.snapshot().auth.liked_songs;
        assert!(liked.iter().all(|s| s.track_name != "S1"));
        assert_eq!(liked, vec![SongInfo::new("S2", "b")]);
        assert_eq!(h.api.calls(), vec!["likes", "unlike:S1", "likes"]);
    }

    #[tokio::test]
    async fn test_unlike_failure_still_resyncs() {
        let h = harness(MockScript {
            likes: vec![SongInfo::new("S1", "a")],
            unlike_error: Some(detail_error("Like not found")),
            ..Default::default()
        });

        let err = h.store.unlike("S1").await.unwrap_err();
        assert_eq!(err.message(), "Like not found");
        assert_eq!(h.api.call_count("likes"), 1);
        assert_eq!(h.store.snapshot().auth.liked_songs.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let h = harness(MockScript {
            likes: vec![SongInfo::new("S1", "a")],
            ..Default::default()
        });
        h.store.login(credentials()).await.unwrap();
        h.store.settle().await;

        h.store.logout();

        let state = h.store.snapshot();
        assert_eq!(state.auth.token, None);
        assert_eq!(state.auth.user, None);
        assert!(state.auth.liked_songs.is_empty());
        assert_eq!(h.tokens.load(), None);

        // Logging out twice is harmless
        h.store.logout();
        assert_eq!(h.store.snapshot().auth.token, None);
    }
}
