//! Typed service clients.
//!
//! Each client wraps the [`Transport`](crate::Transport) of one credential
//! key and is obtained from [`ClientCache::get_client`](crate::ClientCache::get_client).

pub(crate) mod endpoints;
mod participants;
mod studies;
mod subpopulations;

pub use participants::ParticipantsApi;
pub use studies::StudiesApi;
pub use subpopulations::SubpopulationsApi;
