//! Auth slice transitions.

use crate::store::messages::AuthMessage;
use crate::store::state::{AuthState, RequestStatus};

/// Handle auth messages
pub fn handle_auth(state: &mut AuthState, message: AuthMessage) {
    match message {
        AuthMessage::LoginStarted | AuthMessage::SignupStarted => {
            state.status = RequestStatus::Loading;
            state.error = None;
        }
        AuthMessage::LoginSucceeded { token } => {
            state.status = RequestStatus::Succeeded;
            state.token = Some(token);
        }
        AuthMessage::SignupSucceeded => {
            // Signup never authenticates
            state.status = RequestStatus::Succeeded;
        }
        AuthMessage::LoginFailed(error) | AuthMessage::SignupFailed(error) => {
            // An existing session survives a failed attempt
            state.status = RequestStatus::Failed;
            state.error = Some(error);
        }
        AuthMessage::ProfileLoaded(user) => {
            state.user = Some(user);
        }
        AuthMessage::LikesLoaded(songs) => {
            state.liked_songs = songs;
        }
        AuthMessage::LoggedOut => {
            state.user = None;
            state.token = None;
            state.liked_songs.clear();
        }
    }
}
