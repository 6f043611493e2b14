//! Recommendation queries, likes and clearing.

use std::future::Future;

use crate::api::ApiError;
use crate::model::{AudioUpload, Recommendations};
use crate::store::messages::{QueryKind, RecommendationsMessage};
use crate::store::{OperationError, Store, update};

const BY_NAME_FAILED: &str = "Failed to fetch recommendations";
const BY_AUDIO_FAILED: &str = "Failed to process audio file";
const FOR_USER_FAILED: &str = "Failed to get 'For You' recommendations";
const LIKE_FAILED: &str = "Could not like song";

/// What happened to a query's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The response is now in the state
    Applied,
    /// A newer query was issued first; the response was dropped
    Superseded,
}

impl Store {
    /// Recommendations seeded by a library track.
    pub async fn query_by_name(&self, song_name: &str) -> Result<QueryOutcome, OperationError> {
        tracing::info!(song = song_name, "Requesting recommendations");
        self.run_query(
            QueryKind::ByName,
            BY_NAME_FAILED,
            self.inner.api.recommend_by_name(song_name),
        )
        .await
    }

    /// Recommendations for an uploaded audio file.
    ///
    /// The file name is visible in the state as soon as the query starts.
    pub async fn query_by_audio(&self, upload: AudioUpload) -> Result<QueryOutcome, OperationError> {
        tracing::info!(
            file = %upload.file_name,
            mime = %upload.mime_type,
            bytes = upload.bytes.len(),
            "Uploading audio for analysis"
        );
        let kind = QueryKind::ByAudio {
            file_name: upload.file_name.clone(),
        };
        self.run_query(kind, BY_AUDIO_FAILED, self.inner.api.recommend_by_audio(&upload))
            .await
    }

    /// Personalized recommendations. `count` defaults to the configured value.
    pub async fn query_for_user(&self, count: Option<u32>) -> Result<QueryOutcome, OperationError> {
        let count = count.unwrap_or(self.inner.options.default_count);
        tracing::info!(count, "Requesting personalized recommendations");
        self.run_query(
            QueryKind::ForUser,
            FOR_USER_FAILED,
            self.inner.api.recommend_for_me(count),
        )
        .await
    }

    async fn run_query<F>(
        &self,
        kind: QueryKind,
        fallback: &str,
        request: F,
    ) -> Result<QueryOutcome, OperationError>
    where
        F: Future<Output = Result<Recommendations, ApiError>>,
    {
        // `request` is lazy: nothing is sent before the pending state is applied
        let id = self.begin_query(kind.clone());

        match request.await {
            Ok(results) => {
                tracing::debug!(request = id, count = results.songs.len(), "Recommendations received");
                let message = RecommendationsMessage::QuerySucceeded { kind, results };
                if self.finish_query(id, message) {
                    Ok(QueryOutcome::Applied)
                } else {
                    Ok(QueryOutcome::Superseded)
                }
            }
            Err(e) => {
                let err = OperationError::from_api(e, fallback);
                tracing::warn!(request = id, "Recommendation query failed: {}", err);
                if self.finish_query(id, RecommendationsMessage::QueryFailed(err.message())) {
                    Err(err)
                } else {
                    Ok(QueryOutcome::Superseded)
                }
            }
        }
    }

    /// Like a track on the server.
    ///
    /// Tracked by `like_status` only; the query status and results are untouched.
    pub async fn like_song(&self, track_name: &str) -> Result<(), OperationError> {
        self.dispatch(RecommendationsMessage::LikeStarted);
        self.send_like(track_name).await
    }

    /// Send a like whose `LikeStarted` transition has already been applied.
    pub(super) async fn send_like(&self, track_name: &str) -> Result<(), OperationError> {
        let result = self.inner.api.like(track_name).await;
        self.dispatch(RecommendationsMessage::LikeSettled);

        result.map_err(|e| {
            let err = OperationError::from_api(e, LIKE_FAILED);
            tracing::warn!(track = track_name, "Like failed: {}", err);
            err
        })
    }

    /// Reset results, status, error and query context.
    ///
    /// Under latest-issued ordering, queries still in flight are dropped when
    /// they resolve.
    pub fn clear(&self) {
        let fence = &self.inner.fence;
        self.inner.state.send_modify(|state| {
            fence.issue();
            update::update(state, RecommendationsMessage::Cleared.into());
        });
    }
}
