//! bridge-rest - Authenticated client cache for the Bridge REST API
//!
//! This library hands out typed service clients bound to a credential context
//! (anonymous, or signed in as a specific account). Clients and the HTTP
//! transports behind them are cached per credential and reused while the
//! application holds them. Sessions are obtained lazily and refreshed
//! transparently: a request rejected with `401` triggers one re-sign-in and
//! one retry.
//!
//! # Example
//!
//! ```no_run
//! use bridge_rest::{ClientCache, ClientConfig, CredentialKey, SignIn};
//! use bridge_rest::api::{ParticipantsApi, StudiesApi};
//!
//! # async fn example() -> Result<(), bridge_rest::Error> {
//! let config = ClientConfig::new("https://webservices.sagebridge.org")?;
//! let cache = ClientCache::new(config)?;
//!
//! let studies = cache.anonymous_client::<StudiesApi>();
//! for study in studies.get_study_summaries().await?.items {
//!     println!("{}: {}", study.identifier, study.name);
//! }
//!
//! let alice = CredentialKey::from(SignIn::new("api", "alice@example.org", "P4ssword"));
//! let participants = cache.get_client::<ParticipantsApi>(&alice);
//! let me = participants.get_self().await?;
//! println!("signed in as {}", me.id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export primary types at crate root for convenience
pub use auth::{CredentialKey, Session, SignIn};
pub use cache::{ClientCache, Service};
pub use config::{BaseUrl, ClientConfig};
pub use error::Error;
pub use transport::Transport;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
