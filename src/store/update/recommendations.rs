//! Recommendations slice transitions.
//!
//! All three query kinds share one status. Each success replaces the whole
//! result set and the query context together, so the displayed songs, file
//! name and audio features always come from the same response.

use crate::store::messages::{QueryKind, RecommendationsMessage};
use crate::store::state::{LikeStatus, RecommendationsState, RequestStatus};

/// Handle recommendations messages
pub fn handle_recommendations(state: &mut RecommendationsState, message: RecommendationsMessage) {
    match message {
        RecommendationsMessage::QueryStarted(kind) => {
            state.status = RequestStatus::Loading;
            state.error = None;
            state.query_audio_features = None;
            // Recorded before the response so the file can be shown while analyzing
            state.query_file_name = match kind {
                QueryKind::ByAudio { file_name } => Some(file_name),
                QueryKind::ByName | QueryKind::ForUser => None,
            };
        }
        RecommendationsMessage::QuerySucceeded { kind, results } => {
            state.status = RequestStatus::Succeeded;
            state.error = None;
            state.songs = results.songs;
            match kind {
                QueryKind::ByAudio { file_name } => {
                    state.query_file_name = Some(file_name);
                    state.query_audio_features = results.query_audio_features;
                }
                QueryKind::ByName | QueryKind::ForUser => {
                    state.query_file_name = None;
                    state.query_audio_features = None;
                }
            }
        }
        RecommendationsMessage::QueryFailed(error) => {
            state.status = RequestStatus::Failed;
            state.error = Some(error);
        }
        RecommendationsMessage::LikeStarted => {
            state.likes_in_flight += 1;
            state.like_status = LikeStatus::Loading;
        }
        RecommendationsMessage::LikeSettled => {
            state.likes_in_flight = state.likes_in_flight.saturating_sub(1);
            if state.likes_in_flight == 0 {
                state.like_status = LikeStatus::Idle;
            }
        }
        RecommendationsMessage::Cleared => {
            state.songs.clear();
            state.status = RequestStatus::Idle;
            state.error = None;
            state.query_file_name = None;
            state.query_audio_features = None;
        }
    }
}
