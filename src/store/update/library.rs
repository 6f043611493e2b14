//! Library slice transitions.

use crate::store::messages::LibraryMessage;
use crate::store::state::{LibraryState, RequestStatus};

/// Handle library messages
pub fn handle_library(state: &mut LibraryState, message: LibraryMessage) {
    match message {
        LibraryMessage::LoadStarted => {
            state.status = RequestStatus::Loading;
            state.error = None;
        }
        LibraryMessage::Loaded { songs, at } => {
            state.status = RequestStatus::Succeeded;
            state.songs = songs;
            state.fetched_at = Some(at);
        }
        LibraryMessage::LoadFailed(error) => {
            state.status = RequestStatus::Failed;
            state.error = Some(error);
        }
        LibraryMessage::QueryChanged(query) => {
            state.query = query;
        }
        LibraryMessage::QueryApplied(query) => {
            state.applied_query = query;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SongInfo;
    use std::time::Instant;

    #[test]
    fn test_load_lifecycle() {
        let mut state = LibraryState::default();
        handle_library(&mut state, LibraryMessage::LoadStarted);
        assert_eq!(state.status, RequestStatus::Loading);

        let at = Instant::now();
        handle_library(
            &mut state,
            LibraryMessage::Loaded {
                songs: vec![SongInfo::new("A", "x")],
                at,
            },
        );
        assert_eq!(state.status, RequestStatus::Succeeded);
        assert_eq!(state.songs.len(), 1);
        assert_eq!(state.fetched_at, Some(at));
    }

    #[test]
    fn test_typed_query_applies_separately() {
        let mut state = LibraryState {
            songs: vec![SongInfo::new("Naima", "Coltrane"), SongInfo::new("So What", "Davis")],
            ..Default::default()
        };

        handle_library(&mut state, LibraryMessage::QueryChanged("nai".to_string()));
        assert_eq!(state.query, "nai");
        assert_eq!(state.filtered().len(), 2);

        handle_library(&mut state, LibraryMessage::QueryApplied("nai".to_string()));
        assert_eq!(state.filtered(), vec![&SongInfo::new("Naima", "Coltrane")]);
    }

    #[test]
    fn test_failed_reload_keeps_songs() {
        let mut state = LibraryState {
            songs: vec![SongInfo::new("A", "x")],
            ..Default::default()
        };
        handle_library(&mut state, LibraryMessage::LoadStarted);
        handle_library(&mut state, LibraryMessage::LoadFailed("Error loading songs".to_string()));
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.songs.len(), 1);
    }
}
