//! Async operations on the store.
//!
//! Each operation reports its pending/fulfilled/rejected transitions as
//! messages and catches failures at its boundary: the slice records the
//! user-facing message and the caller gets the same text back as an
//! [`OperationError`](super::OperationError). Nothing is retried.
//!
//! - `auth`: login, signup, profile, likes, unlike, logout
//! - `recommendations`: the three queries, like, clear
//! - `library`: library load and debounced filter
//! - `interactions`: user-level flows that combine the above with toasts

mod auth;
mod interactions;
mod library;
mod recommendations;

pub use recommendations::QueryOutcome;

