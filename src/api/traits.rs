//! Trait definition for the recommendation backend.
//!
//! The store talks to the backend only through [`DiscoveryApi`], so tests can
//! substitute the scripted [`mocks::MockBackend`] for the real HTTP client.

use async_trait::async_trait;

use super::client::ApiClient;
use super::error::ApiError;
use crate::model::{AudioUpload, Credentials, Recommendations, SessionGrant, SongInfo, User};

/// Operations offered by the recommendation backend.
#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    /// Full song library
    async fn list_songs(&self) -> Result<Vec<SongInfo>, ApiError>;

    /// Profile of the session owner (auth required)
    async fn me(&self) -> Result<User, ApiError>;

    /// Liked songs of the session owner (auth required)
    async fn my_likes(&self) -> Result<Vec<SongInfo>, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<SessionGrant, ApiError>;

    async fn signup(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// Recommendations seeded by a library track
    async fn recommend_by_name(&self, song_name: &str) -> Result<Recommendations, ApiError>;

    /// Recommendations for an uploaded audio file
    async fn recommend_by_audio(&self, upload: &AudioUpload)
    -> Result<Recommendations, ApiError>;

    /// Personalized recommendations (auth required)
    async fn recommend_for_me(&self, count: u32) -> Result<Recommendations, ApiError>;

    async fn like(&self, track_name: &str) -> Result<(), ApiError>;

    async fn unlike(&self, track_name: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl DiscoveryApi for ApiClient {
    async fn list_songs(&self) -> Result<Vec<SongInfo>, ApiError> {
        self.list_songs().await
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.me().await
    }

    async fn my_likes(&self) -> Result<Vec<SongInfo>, ApiError> {
        self.my_likes().await
    }

    async fn login(&self, credentials: &Credentials) -> Result<SessionGrant, ApiError> {
        self.login(credentials).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.signup(credentials).await
    }

    async fn recommend_by_name(&self, song_name: &str) -> Result<Recommendations, ApiError> {
        self.recommend_by_name(song_name).await
    }

    async fn recommend_by_audio(
        &self,
        upload: &AudioUpload,
    ) -> Result<Recommendations, ApiError> {
        self.recommend_by_audio(upload).await
    }

    async fn recommend_for_me(&self, count: u32) -> Result<Recommendations, ApiError> {
        self.recommend_for_me(count).await
    }

    async fn like(&self, track_name: &str) -> Result<(), ApiError> {
        self.like(track_name).await
    }

    async fn unlike(&self, track_name: &str) -> Result<(), ApiError> {
        self.unlike(track_name).await
    }
}
