//! Toast notifications for non-blocking user feedback.
//!
//! Toasts are ephemeral messages that expire after [`TOAST_DURATION`].
//! They live in the store so any front end can render them.
//!
//! # Example
//! ```ignore
//! store.notify(ToastLevel::Success, "'Naima' added to your likes!");
//! ```

use std::time::{Duration, Instant};

/// Duration before toasts auto-dismiss
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Maximum number of visible toasts at once
pub const MAX_VISIBLE_TOASTS: usize = 5;

/// Toast severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastLevel {
    /// Short tag for plain-text rendering
    pub fn tag(&self) -> &'static str {
        match self {
            ToastLevel::Success => "ok",
            ToastLevel::Error => "error",
            ToastLevel::Warning => "warn",
            ToastLevel::Info => "info",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Unique ID for this toast (for removal)
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Toast {
    /// Create a new toast with auto-generated ID
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        Self {
            id: COUNTER.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_DURATION
    }
}

/// Container for managing multiple toasts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Add a toast to the queue
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
        // Keep only the most recent toasts
        if self.toasts.len() > MAX_VISIBLE_TOASTS * 2 {
            self.toasts.drain(0..MAX_VISIBLE_TOASTS);
        }
    }

    /// Remove a toast by ID
    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Remove all toasts expired at `now`
    pub fn remove_expired(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    /// Visible toasts at `now` (most recent, up to MAX_VISIBLE_TOASTS)
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        let start = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
        self.toasts[start..]
            .iter()
            .filter(move |t| !t.is_expired(now))
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
