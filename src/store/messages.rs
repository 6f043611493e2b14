//! Message types applied to the store.
//!
//! Async operations report their pending/fulfilled/rejected transitions as
//! messages; `store::update` turns each one into a state change.

use std::time::Instant;

use super::toast::Toast;
use crate::model::{Recommendations, SongInfo, User};

/// All state transitions, grouped by slice
#[derive(Debug, Clone)]
pub enum Message {
    Auth(AuthMessage),
    Recommendations(RecommendationsMessage),
    Library(LibraryMessage),
    Toast(ToastMessage),
}

#[derive(Clone)]
pub enum AuthMessage {
    LoginStarted,
    LoginSucceeded { token: String },
    LoginFailed(String),
    SignupStarted,
    SignupSucceeded,
    SignupFailed(String),
    ProfileLoaded(User),
    LikesLoaded(Vec<SongInfo>),
    LoggedOut,
}

// Tokens stay out of debug logs
impl std::fmt::Debug for AuthMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoginStarted => f.write_str("LoginStarted"),
            Self::LoginSucceeded { .. } => f.write_str("LoginSucceeded { token: <redacted> }"),
            Self::LoginFailed(e) => f.debug_tuple("LoginFailed").field(e).finish(),
            Self::SignupStarted => f.write_str("SignupStarted"),
            Self::SignupSucceeded => f.write_str("SignupSucceeded"),
            Self::SignupFailed(e) => f.debug_tuple("SignupFailed").field(e).finish(),
            Self::ProfileLoaded(user) => f.debug_tuple("ProfileLoaded").field(user).finish(),
            Self::LikesLoaded(songs) => write!(f, "LikesLoaded({} songs)", songs.len()),
            Self::LoggedOut => f.write_str("LoggedOut"),
        }
    }
}

/// Which of the three query kinds produced a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    ByName,
    ByAudio { file_name: String },
    ForUser,
}

#[derive(Debug, Clone)]
pub enum RecommendationsMessage {
    QueryStarted(QueryKind),
    QuerySucceeded {
        kind: QueryKind,
        results: Recommendations,
    },
    QueryFailed(String),
    LikeStarted,
    LikeSettled,
    Cleared,
}

#[derive(Debug, Clone)]
pub enum LibraryMessage {
    LoadStarted,
    Loaded { songs: Vec<SongInfo>, at: Instant },
    LoadFailed(String),
    QueryChanged(String),
    QueryApplied(String),
}

#[derive(Debug, Clone)]
pub enum ToastMessage {
    Pushed(Toast),
    Dismissed(u64),
    Expired(Instant),
}

impl From<AuthMessage> for Message {
    fn from(message: AuthMessage) -> Self {
        Self::Auth(message)
    }
}

impl From<RecommendationsMessage> for Message {
    fn from(message: RecommendationsMessage) -> Self {
        Self::Recommendations(message)
    }
}

impl From<LibraryMessage> for Message {
    fn from(message: LibraryMessage) -> Self {
        Self::Library(message)
    }
}

impl From<ToastMessage> for Message {
    fn from(message: ToastMessage) -> Self {
        Self::Toast(message)
    }
}
