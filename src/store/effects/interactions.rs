//! User-level like/unlike flows with toast feedback.

use crate::store::{OperationError, Store, ToastLevel};

impl Store {
    /// Fail with [`OperationError::NotLoggedIn`] when there is no session.
    pub fn require_session(&self) -> Result<(), OperationError> {
        if self.read(|s| s.auth.is_authenticated()) {
            Ok(())
        } else {
            Err(OperationError::NotLoggedIn)
        }
    }

    /// Like a track, resync the like list and confirm with a toast.
    ///
    /// Refused while logged out or while another like is in flight.
    pub async fn like_track(&self, track_name: &str) -> Result<(), OperationError> {
        if let Err(e) = self.require_session() {
            self.notify(ToastLevel::Warning, e.message());
            return Err(e);
        }
        if !self.begin_like() {
            return Err(OperationError::LikeInProgress);
        }

        if let Err(e) = self.send_like(track_name).await {
            self.notify(ToastLevel::Error, e.message());
            return Err(e);
        }
        if let Err(e) = self.fetch_likes().await {
            tracing::warn!("Like list resync after like failed: {}", e);
        }

        self.notify(
            ToastLevel::Success,
            format!("'{}' added to your likes!", track_name),
        );
        Ok(())
    }

    /// Unlike a track and confirm with a toast.
    pub async fn unlike_track(&self, track_name: &str) -> Result<(), OperationError> {
        if let Err(e) = self.require_session() {
            self.notify(ToastLevel::Warning, e.message());
            return Err(e);
        }

        match self.unlike(track_name).await {
            Ok(()) => {
                self.notify(
                    ToastLevel::Success,
                    format!("'{}' removed from your likes.", track_name),
                );
                Ok(())
            }
            Err(e) => {
                self.notify(ToastLevel::Error, e.message());
                Err(e)
            }
        }
    }
}
