//! Session values.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::UserSessionInfo;

use super::credentials::SignIn;

/// An opaque session token.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in the session header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// An authenticated session for one [`SignIn`].
///
/// Sessions are immutable. A refresh produces a new `Session`; holders of
/// the old value keep seeing the old token.
#[derive(Clone)]
pub struct Session {
    token: SessionToken,
    sign_in: SignIn,
    created_at: DateTime<Utc>,
    user_id: Option<String>,
    authenticated: bool,
    consented: bool,
}

impl Session {
    /// Create a session for `sign_in` holding `token`.
    pub fn new(sign_in: SignIn, token: impl Into<String>) -> Self {
        Self {
            token: SessionToken::new(token),
            sign_in,
            created_at: Utc::now(),
            user_id: None,
            authenticated: true,
            consented: true,
        }
    }

    /// Build a session from the sign-in response body.
    pub fn from_user_session_info(sign_in: SignIn, info: UserSessionInfo) -> Self {
        Self {
            token: SessionToken::new(info.session_token),
            sign_in,
            created_at: Utc::now(),
            user_id: info.id,
            authenticated: info.authenticated,
            consented: info.consented,
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// The credentials this session was obtained with.
    pub fn sign_in(&self) -> &SignIn {
        &self.sign_in
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// False when the account still has to consent to a required
    /// subpopulation.
    pub fn is_consented(&self) -> bool {
        self.consented
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("sign_in", &self.sign_in)
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("consented", &self.consented)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
