//! Session and like-list commands.

use tokio::runtime::Runtime;

use super::print_toasts;
use crate::model::Credentials;
use crate::store::Store;

/// Log in and save the session token
pub fn cmd_login(rt: &Runtime, store: &Store, email: &str, password: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        store.login(Credentials::new(email, password)).await?;
        // Profile and likes load in the background
        store.settle().await;

        match store.read(|s| s.auth.user.clone()) {
            Some(user) => println!("Logged in as {}", user.email),
            None => println!("Logged in"),
        }
        print_toasts(store);
        anyhow::Ok(())
    })
}

/// Create an account
pub fn cmd_signup(rt: &Runtime, store: &Store, email: &str, password: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        store.signup(Credentials::new(email, password)).await?;
        println!("Account created for {}. Log in to continue.", email);
        anyhow::Ok(())
    })
}

/// Forget the saved session
pub fn cmd_logout(store: &Store) -> anyhow::Result<()> {
    let was_logged_in = store.read(|s| s.auth.is_authenticated());
    store.logout();
    if was_logged_in {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

/// Show the logged-in user
pub fn cmd_me(rt: &Runtime, store: &Store) -> anyhow::Result<()> {
    store.require_session()?;
    rt.block_on(async {
        let user = store.fetch_profile().await?;
        println!("{} (id {})", user.email, user.id);
        if !user.is_active {
            println!("Account is inactive");
        }
        anyhow::Ok(())
    })
}

/// List liked songs
pub fn cmd_likes(rt: &Runtime, store: &Store) -> anyhow::Result<()> {
    store.require_session()?;
    rt.block_on(async {
        let songs = store.fetch_likes().await?;
        if songs.is_empty() {
            println!("No liked songs yet");
        }
        for song in songs {
            println!("{} - {}", song.track_name, song.artist_name);
        }
        anyhow::Ok(())
    })
}

/// Like a song
pub fn cmd_like(rt: &Runtime, store: &Store, track: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let result = store.like_track(track).await;
        // Failures are reported through the returned error
        if result.is_ok() {
            print_toasts(store);
        }
        anyhow::Ok(result?)
    })
}

/// Remove a like
pub fn cmd_unlike(rt: &Runtime, store: &Store, track: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let result = store.unlike_track(track).await;
        if result.is_ok() {
            print_toasts(store);
        }
        anyhow::Ok(result?)
    })
}
