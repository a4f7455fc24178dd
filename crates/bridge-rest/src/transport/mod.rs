//! HTTP transports and the factory that configures them.
//!
//! A [`Transport`] is one configured channel to the server: a shared
//! `reqwest::Client`, the base URL, and (for signed-in keys) the request
//! authenticator. Error responses are normalized into [`crate::Error`] here.

mod client;
mod factory;

pub use client::Transport;
pub(crate) use client::{TransportInner, error_from_response};
pub use factory::TransportFactory;
