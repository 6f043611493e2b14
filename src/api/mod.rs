//! Recommendation backend API.
//!
//! # Architecture
//!
//! Same layering as any external service we talk to:
//! - **DTOs** (`dto.rs`) - exact request/response shapes on the wire
//! - **Adapter** (`adapter.rs`) - DTO → domain conversion, error detail extraction
//! - **Client** (`client.rs`) - reqwest client with per-request bearer credentials
//! - **Traits** (`traits.rs`) - [`DiscoveryApi`] seam used by the store, plus mocks
//!
//! # Usage
//!
//! ```ignore
//! let client = Arc::new(ApiClient::new("http://localhost:8000", Duration::from_secs(30))?);
//! let store = Store::new(client.clone(), tokens, StoreOptions::default());
//! client.install_credentials(store.credential_provider());
//! ```

pub mod adapter;
pub mod client;
pub mod dto;
pub mod error;
pub mod traits;

pub use client::{ApiClient, CredentialProvider};
pub use error::ApiError;
pub use traits::DiscoveryApi;
