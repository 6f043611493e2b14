//! Recommendation commands.

use std::path::Path;

use tokio::runtime::Runtime;
use tokio::sync::watch;

use super::print_toasts;
use crate::error::ResultExt;
use crate::model::AudioUpload;
use crate::store::{AppState, Store};

/// Songs similar to a library track
pub fn cmd_recommend_name(rt: &Runtime, store: &Store, song: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        store.query_by_name(song).await?;
        println!("Because you picked \"{}\":\n", song);
        store.read(print_recommendations);
        anyhow::Ok(())
    })
}

/// Songs similar to an audio file
pub fn cmd_recommend_audio(rt: &Runtime, store: &Store, path: &Path) -> anyhow::Result<()> {
    rt.block_on(async {
        let upload = AudioUpload::from_path(path)
            .await
            .with_context(format!("Reading {}", path.display()))?;

        let mut state = store.subscribe();
        let announce = async {
            if let Some(file) = wait_for_analysis(&mut state).await {
                println!("Analyzing {}...", file);
            }
            std::future::pending::<()>().await
        };
        tokio::select! {
            result = store.query_by_audio(upload) => { result?; }
            _ = announce => {}
        }

        store.read(|s| {
            if let Some(features) = &s.recommendations.query_audio_features {
                println!(
                    "Tempo {:.0} BPM, brightness {:.0} Hz, energy {:.3}\n",
                    features.tempo, features.spectral_centroid, features.rms_energy
                );
            }
            print_recommendations(s);
        });
        anyhow::Ok(())
    })
}

/// Personalized recommendations
pub fn cmd_recommend_for_me(rt: &Runtime, store: &Store, count: Option<u32>) -> anyhow::Result<()> {
    store.require_session()?;
    rt.block_on(async {
        store.query_for_user(count).await?;
        println!("Picked for you:\n");
        store.read(print_recommendations);
        print_toasts(store);
        anyhow::Ok(())
    })
}

/// Wait until an audio upload is being analyzed and return its file name
async fn wait_for_analysis(state: &mut watch::Receiver<AppState>) -> Option<String> {
    let current = state
        .wait_for(|s| s.recommendations.analyzing_file().is_some())
        .await
        .ok()?;
    current.recommendations.analyzing_file().map(str::to_string)
}

fn print_recommendations(state: &AppState) {
    let recommendations = &state.recommendations;
    if recommendations.songs.is_empty() {
        println!("No recommendations");
        return;
    }
    for song in &recommendations.songs {
        let label = song
            .match_label()
            .map(|l| format!(" ({})", l))
            .unwrap_or_default();
        let genre = song
            .genre
            .as_deref()
            .map(|g| format!(" [{}]", g))
            .unwrap_or_default();
        let liked = if state.auth.is_liked(song.track_name()) { " *" } else { "" };
        println!(
            "{:>2}. {} - {}{}{}{}",
            song.rank,
            song.track_name(),
            song.artist_name(),
            label,
            genre,
            liked
        );
        println!("    {}", song.song.youtube_search_url());
    }
}
