//! Core domain models shared by the API client and the store.
//!
//! These are OUR types. Wire shapes live in [`crate::api::dto`] and are
//! converted by the adapter, so a backend rename only touches the API layer.
//!
//! Track names double as identifiers: the backend exposes no numeric song id,
//! so likes and seed queries are keyed by `track_name`.

use std::path::Path;

/// A song in the backend library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongInfo {
    pub track_name: String,
    pub artist_name: String,
}

impl SongInfo {
    pub fn new(track_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artist_name: artist_name.into(),
        }
    }

    /// YouTube search link for this song
    pub fn youtube_search_url(&self) -> String {
        let query = format!("{} {}", self.track_name, self.artist_name);
        format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(&query)
        )
    }
}

/// A ranked recommendation.
///
/// `rank` is assigned by the server (1-based) and results are kept in the
/// order received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedSong {
    pub song: SongInfo,
    /// 1-based position in the result set
    pub rank: u32,
    /// Similarity to the query (0.0 to 1.0). Absent for personalized results.
    pub similarity_score: Option<f32>,
    pub genre: Option<String>,
}

impl RecommendedSong {
    pub fn track_name(&self) -> &str {
        &self.song.track_name
    }

    pub fn artist_name(&self) -> &str {
        &self.song.artist_name
    }

    /// Whole-percent match label, e.g. "87% match".
    ///
    /// Returns `None` when the server sent no score.
    pub fn match_label(&self) -> Option<String> {
        self.similarity_score
            .map(|score| format!("{:.0}% match", score * 100.0))
    }
}

/// The logged-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

/// Audio descriptors the backend computed for an uploaded query file.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFeatures {
    /// Beats per minute
    pub tempo: f32,
    pub spectral_centroid: f32,
    pub rms_energy: f32,
    /// 12-bin chroma vector
    pub chroma: Vec<f32>,
    pub mfccs: Vec<f32>,
}

/// Ranked results plus, for audio queries, the features of the query file.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub songs: Vec<RecommendedSong>,
    pub query_audio_features: Option<AudioFeatures>,
}

/// Email/password pair used for both login and signup
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub access_token: String,
    pub token_type: Option<String>,
}

/// An audio file queued for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    /// File name shown while the query is analyzed
    pub file_name: String,
    /// MIME type sent with the multipart part
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    /// Build an upload from in-memory bytes, guessing the MIME type from the name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Read an upload from disk
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}
