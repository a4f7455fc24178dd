//! Credentials, sessions and the request authentication protocol.
//!
//! A [`CredentialKey`] names who is calling. The [`SessionResolver`] turns a
//! signed-in key into a [`Session`] and keeps it until the service rejects
//! it. The request authenticator attaches the session to outgoing requests
//! and drives the single reauthentication retry.

mod authenticator;
mod credentials;
mod resolver;
mod session;

pub(crate) use authenticator::RequestAuthenticator;
pub use credentials::{CredentialKey, SignIn};
pub use resolver::{HttpSignInExchange, SessionResolver, SignInExchange};
pub use session::{Session, SessionToken};

/// Header carrying the session token on authenticated requests.
pub const SESSION_HEADER: &str = "Bridge-Session";
