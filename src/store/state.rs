//! State types held by the [`Store`](super::Store).
//!
//! Every field is replaced through a [`Message`](super::messages::Message);
//! nothing outside `store::update` mutates these structs.

use std::time::{Duration, Instant};

use super::toast::ToastQueue;
use crate::library;
use crate::model::{AudioFeatures, RecommendedSong, SongInfo, User};

/// Lifecycle of the most recent request in a slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Like requests run beside the main query status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LikeStatus {
    #[default]
    Idle,
    Loading,
}

/// Top-level application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub recommendations: RecommendationsState,
    pub library: LibraryState,
    pub toasts: ToastQueue,
}

impl AppState {
    /// Initial state, optionally restoring a persisted session token
    pub fn new(token: Option<String>) -> Self {
        Self {
            auth: AuthState::new(token),
            ..Default::default()
        }
    }
}

/// Identity slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// The only authorization signal: `None` means anonymous
    pub token: Option<String>,
    pub liked_songs: Vec<SongInfo>,
    /// Shared by login and signup
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl AuthState {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            ..Default::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Logged in but `/users/me` hasn't answered yet. A normal transient state.
    pub fn is_profile_pending(&self) -> bool {
        self.token.is_some() && self.user.is_none()
    }

    pub fn is_liked(&self, track_name: &str) -> bool {
        self.liked_songs.iter().any(|s| s.track_name == track_name)
    }
}

/// Recommendation results slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationsState {
    /// Server order, never re-sorted
    pub songs: Vec<RecommendedSong>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Name of the uploaded file behind the current results
    pub query_file_name: Option<String>,
    /// Features the server computed for the uploaded file
    pub query_audio_features: Option<AudioFeatures>,
    pub like_status: LikeStatus,
    /// Like requests not yet settled; `like_status` is `Loading` while > 0
    pub(crate) likes_in_flight: u32,
}

impl RecommendationsState {
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// "Analyzing <file>" while an audio query is pending
    pub fn analyzing_file(&self) -> Option<&str> {
        if self.is_loading() {
            self.query_file_name.as_deref()
        } else {
            None
        }
    }
}

/// Song library slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
    pub songs: Vec<SongInfo>,
    pub status: RequestStatus,
    pub error: Option<String>,
    /// Filter text as typed
    pub query: String,
    /// Filter text in effect (lags `query` by the debounce period)
    pub applied_query: String,
    pub fetched_at: Option<Instant>,
}

impl LibraryState {
    /// Songs matching the applied filter, in library order
    pub fn filtered(&self) -> Vec<&SongInfo> {
        library::filter_songs(&self.songs, &self.applied_query)
    }

    /// Whether the last successful load is younger than `max_age`
    pub fn is_fresh(&self, now: Instant, max_age: Duration) -> bool {
        self.status == RequestStatus::Succeeded
            && self
                .fetched_at
                .is_some_and(|at| now.saturating_duration_since(at) < max_age)
    }
}
