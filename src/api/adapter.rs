//! Adapter layer: convert backend DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::model::{
    AudioFeatures, RecommendedSong, Recommendations, SessionGrant, SongInfo, User,
};

pub fn to_song(song: dto::SongInfo) -> SongInfo {
    SongInfo {
        track_name: song.track_name,
        artist_name: song.artist_name,
    }
}

pub fn to_songs(songs: Vec<dto::SongInfo>) -> Vec<SongInfo> {
    songs.into_iter().map(to_song).collect()
}

pub fn to_user(user: dto::User) -> User {
    User {
        id: user.id,
        email: user.email,
        is_active: user.is_active,
    }
}

pub fn to_session(token: dto::TokenResponse) -> SessionGrant {
    SessionGrant {
        access_token: token.access_token,
        token_type: token.token_type,
    }
}

/// Convert a query response, keeping the server's order untouched.
pub fn to_recommendations(response: dto::RecommendationsResponse) -> Recommendations {
    Recommendations {
        songs: response
            .recommendations
            .into_iter()
            .map(to_recommended)
            .collect(),
        query_audio_features: response.query_audio_features.map(to_features),
    }
}

fn to_recommended(song: dto::RecommendedSong) -> RecommendedSong {
    RecommendedSong {
        song: SongInfo {
            track_name: song.track_name,
            artist_name: song.artist_name,
        },
        rank: song.rank,
        similarity_score: song.similarity_score,
        genre: song.genre.filter(|g| !g.is_empty()),
    }
}

fn to_features(features: dto::AudioFeatures) -> AudioFeatures {
    AudioFeatures {
        tempo: features.tempo,
        spectral_centroid: features.spectral_centroid,
        rms_energy: features.rms_energy,
        chroma: features.chroma,
        mfccs: features.mfccs,
    }
}

/// Flatten an error body's `detail` into one human-readable line.
///
/// Validation errors arrive as a list; their `msg` fields are joined with "; ".
pub fn error_detail(body: dto::ErrorBody) -> Option<String> {
    let detail = body.detail?;
    let text = match detail {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.clone()),
                other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
