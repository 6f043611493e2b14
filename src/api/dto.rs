//! Backend API Data Transfer Objects
//!
//! These types match EXACTLY what the recommendation backend sends and expects.
//! DO NOT use these types outside the api module - convert to domain types.

use serde::{Deserialize, Serialize};

/// Library entry and liked-song entry (`GET /songs`, `GET /users/me/likes`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongInfo {
    pub track_name: String,
    pub artist_name: String,
}

/// One ranked result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendedSong {
    pub track_name: String,
    /// Personalized results may omit the artist
    #[serde(default)]
    pub artist_name: String,
    pub rank: u32,
    /// Explicit `null` and a missing key both mean "no score"
    #[serde(default)]
    pub similarity_score: Option<f32>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Features of the uploaded query audio (`POST /recommend/audio`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeatures {
    pub tempo: f32,
    pub spectral_centroid: f32,
    pub rms_energy: f32,
    #[serde(default)]
    pub chroma: Vec<f32>,
    #[serde(default)]
    pub mfccs: Vec<f32>,
}

/// Body of every `/recommend/*` query response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendedSong>,
    /// Only present for audio queries
    #[serde(default)]
    pub query_audio_features: Option<AudioFeatures>,
}

/// `GET /users/me`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

/// `POST /signup` request body
#[derive(Debug, Clone, Serialize)]
pub struct UserCreate<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /login` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `POST /recommend/metadata` request body
#[derive(Debug, Clone, Serialize)]
pub struct MetadataQuery<'a> {
    pub song_name: &'a str,
}

/// Error body. `detail` is a string for business errors and a list of
/// `{loc, msg, type}` objects for validation errors.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
