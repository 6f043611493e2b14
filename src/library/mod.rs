//! Song library browsing helpers.
//!
//! The library itself is fetched by the store; this module holds the filter
//! applied to it and the debouncer that paces filter updates while typing.

pub mod debounce;

pub use debounce::Debouncer;

use crate::model::SongInfo;

/// Songs whose track or artist name contains `query` (case-insensitive).
///
/// A blank query matches everything. Library order is preserved.
pub fn filter_songs<'a>(songs: &'a [SongInfo], query: &str) -> Vec<&'a SongInfo> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return songs.iter().collect();
    }

    songs
        .iter()
        .filter(|song| {
            song.track_name.to_lowercase().contains(&query)
                || song.artist_name.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn library() -> Vec<SongInfo> {
        vec![
            SongInfo::new("Blue in Green", "Miles Davis"),
            SongInfo::new("Naima", "John Coltrane"),
            SongInfo::new("Giant Steps", "John Coltrane"),
        ]
    }

    #[test]
    fn test_blank_query_returns_all() {
        let songs = library();
        assert_eq!(filter_songs(&songs, "").len(), 3);
        assert_eq!(filter_songs(&songs, "   ").len(), 3);
    }

    #[test]
    fn test_matches_track_or_artist_case_insensitive() {
        let songs = library();
        let by_track: Vec<_> = filter_songs(&songs, "GREEN")
            .iter()
            .map(|s| s.track_name.as_str())
            .collect();
        assert_eq!(by_track, vec!["Blue in Green"]);

        let by_artist: Vec<_> = filter_songs(&songs, " coltrane ")
            .iter()
            .map(|s| s.track_name.as_str())
            .collect();
        assert_eq!(by_artist, vec!["Naima", "Giant Steps"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_songs(&library(), "zeppelin").is_empty());
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subset(
            names in prop::collection::vec("[a-zA-Z ]{1,10}", 0..20),
            query in "[a-z]{0,3}",
        ) {
            let songs: Vec<_> = names.iter().map(|n| SongInfo::new(n.clone(), "Artist")).collect();
            let filtered = filter_songs(&songs, &query);

            prop_assert!(filtered.len() <= songs.len());
            // Order preserved: positions strictly increase
            let positions: Vec<_> = filtered
                .iter()
                .map(|f| songs.iter().position(|s| std::ptr::eq(s, *f)).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
