//! Song library command.

use tokio::runtime::Runtime;

use crate::store::Store;

/// List the song library, optionally filtered
pub fn cmd_songs(rt: &Runtime, store: &Store, search: Option<&str>) -> anyhow::Result<()> {
    rt.block_on(async {
        store.load_library(false).await?;
        if let Some(query) = search {
            store.set_library_query(query);
            store.settle().await;
        }

        store.read(|state| {
            let songs = state.library.filtered();
            for song in &songs {
                println!("{} - {}", song.track_name, song.artist_name);
            }
            println!(
                "\n{} of {} songs",
                songs.len(),
                state.library.songs.len()
            );
        });
        anyhow::Ok(())
    })
}
