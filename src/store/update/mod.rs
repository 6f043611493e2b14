//! Pure state transitions.
//!
//! This module is split per slice:
//! - `auth`: session, profile and liked songs
//! - `recommendations`: query results and like status
//! - `library`: song library and its filter
//!
//! Reducers never perform I/O; the effect layer in `store::effects` decides
//! what to send and turns responses into messages.

mod auth;
mod library;
mod recommendations;

use super::messages::{Message, ToastMessage};
use super::state::AppState;
use super::toast::ToastQueue;

pub use auth::handle_auth;
pub use library::handle_library;
pub use recommendations::handle_recommendations;

/// Apply one message to the state
pub fn update(state: &mut AppState, message: Message) {
    match message {
        Message::Auth(m) => handle_auth(&mut state.auth, m),
        Message::Recommendations(m) => handle_recommendations(&mut state.recommendations, m),
        Message::Library(m) => handle_library(&mut state.library, m),
        Message::Toast(m) => handle_toast(&mut state.toasts, m),
    }
}

fn handle_toast(toasts: &mut ToastQueue, message: ToastMessage) {
    match message {
        ToastMessage::Pushed(toast) => toasts.push(toast),
        ToastMessage::Dismissed(id) => toasts.remove(id),
        ToastMessage::Expired(now) => toasts.remove_expired(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::messages::AuthMessage;
    use crate::store::toast::{Toast, ToastLevel};

    #[test]
    fn test_update_routes_to_slice() {
        let mut state = AppState::default();
        update(
            &mut state,
            AuthMessage::LoginSucceeded {
                token: "t".to_string(),
            }
            .into(),
        );
        assert_eq!(state.auth.token.as_deref(), Some("t"));
        assert_eq!(state.recommendations, Default::default());
    }

    #[test]
    fn test_toast_messages() {
        let mut state = AppState::default();
        let toast = Toast::new(ToastLevel::Success, "saved");
        let id = toast.id;

        update(&mut state, ToastMessage::Pushed(toast).into());
        assert_eq!(state.toasts.len(), 1);

        update(&mut state, ToastMessage::Dismissed(id).into());
        assert!(state.toasts.is_empty());
    }
}
