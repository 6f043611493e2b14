//! Recommendation backend HTTP client
//!
//! One `reqwest::Client` per process, pointed at the configured base URL.
//! Authorization is NOT captured at construction: a credential provider is
//! installed once the store exists and is asked for the current token on
//! every request, so login/logout take effect without rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, multipart};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::{adapter, dto};
use crate::model::{
    AudioUpload, Credentials, Recommendations, SessionGrant, SongInfo, User,
};

/// Supplies the bearer token for the next request, if any.
pub type CredentialProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// User agent string sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Backend API client
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    credentials: RwLock<Option<CredentialProvider>>,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the provider consulted for the bearer token on each request.
    ///
    /// Replaces any previously installed provider.
    pub fn install_credentials(&self, provider: CredentialProvider) {
        *self.credentials.write() = Some(provider);
    }

    fn current_token(&self) -> Option<String> {
        let provider = self.credentials.read().clone()?;
        provider().filter(|t| !t.is_empty())
    }

    /// Start a request to `path` (relative to the base URL) with auth attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http_client.request(method, url);
        match self.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send the request and decode a JSON body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send_checked(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Send the request, discarding whatever body comes back
    async fn send_discarding(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send_checked(builder).await.map(|_| ())
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<dto::ErrorBody>()
            .await
            .ok()
            .and_then(adapter::error_detail);
        tracing::debug!(%status, ?detail, "Backend returned an error");
        Err(ApiError::from_status(status, detail))
    }

    /// `GET /songs`
    pub async fn list_songs(&self) -> Result<Vec<SongInfo>, ApiError> {
        let songs: Vec<dto::SongInfo> = self.send(self.request(Method::GET, "/songs")).await?;
        Ok(adapter::to_songs(songs))
    }

    /// `GET /users/me`
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: dto::User = self.send(self.request(Method::GET, "/users/me")).await?;
        Ok(adapter::to_user(user))
    }

    /// `GET /users/me/likes`
    pub async fn my_likes(&self) -> Result<Vec<SongInfo>, ApiError> {
        let songs: Vec<dto::SongInfo> = self
            .send(self.request(Method::GET, "/users/me/likes"))
            .await?;
        Ok(adapter::to_songs(songs))
    }

    /// `POST /login` with OAuth2-style form fields (`username` carries the email)
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionGrant, ApiError> {
        let form = [
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let token: dto::TokenResponse = self
            .send(self.request(Method::POST, "/login").form(&form))
            .await?;
        Ok(adapter::to_session(token))
    }

    /// `POST /signup`
    pub async fn signup(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let body = dto::UserCreate {
            email: &credentials.email,
            password: &credentials.password,
        };
        self.send_discarding(self.request(Method::POST, "/signup").json(&body))
            .await
    }

    /// `POST /recommend/metadata`
    pub async fn recommend_by_name(&self, song_name: &str) -> Result<Recommendations, ApiError> {
        let body = dto::MetadataQuery { song_name };
        let response: dto::RecommendationsResponse = self
            .send(self.request(Method::POST, "/recommend/metadata").json(&body))
            .await?;
        Ok(adapter::to_recommendations(response))
    }

    /// `POST /recommend/audio` with the file as multipart part `file`
    pub async fn recommend_by_audio(
        &self,
        upload: &AudioUpload,
    ) -> Result<Recommendations, ApiError> {
        let part = multipart::Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        let part = match part.mime_str(&upload.mime_type) {
            Ok(part) => part,
            Err(e) => return Err(ApiError::Validation {
                detail: Some(format!("Unsupported content type {}: {}", upload.mime_type, e)),
            }),
        };
        let form = multipart::Form::new().part("file", part);

        let response: dto::RecommendationsResponse = self
            .send(self.request(Method::POST, "/recommend/audio").multipart(form))
            .await?;
        Ok(adapter::to_recommendations(response))
    }

    /// `POST /recommend/for-me`
    pub async fn recommend_for_me(&self, count: u32) -> Result<Recommendations, ApiError> {
        let form = multipart::Form::new().text("num_recommendations", count.to_string());
        let response: dto::RecommendationsResponse = self
            .send(self.request(Method::POST, "/recommend/for-me").multipart(form))
            .await?;
        Ok(adapter::to_recommendations(response))
    }

    /// `POST /recommend/like/{track}`
    pub async fn like(&self, track_name: &str) -> Result<(), ApiError> {
        self.send_discarding(self.request(Method::POST, &like_path(track_name)))
            .await
    }

    /// `DELETE /recommend/like/{track}`
    pub async fn unlike(&self, track_name: &str) -> Result<(), ApiError> {
        self.send_discarding(self.request(Method::DELETE, &like_path(track_name)))
            .await
    }
}

/// Track names go in the path as a single encoded segment
fn like_path(track_name: &str) -> String {
    format!("/recommend/like/{}", urlencoding::encode(track_name))
}
