//! Session attachment and the reauthenticate-once retry.

use std::fmt;
use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::Result;

use super::credentials::SignIn;
use super::resolver::SessionResolver;
use super::session::{Session, SessionToken};

/// Which send of a logical request this is.
///
/// A request starts `Fresh`. A `401` on a fresh attempt moves it to
/// `Retried` after reauthenticating; whatever the retried attempt returns is
/// final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attempt {
    Fresh,
    Retried,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Fresh => write!(f, "fresh"),
            Attempt::Retried => write!(f, "retried"),
        }
    }
}

/// Attaches the session of one account to requests and reauthenticates
/// once when the service rejects it.
#[derive(Clone)]
pub(crate) struct RequestAuthenticator {
    sign_in: SignIn,
    sessions: Arc<SessionResolver>,
}

impl RequestAuthenticator {
    pub(crate) fn new(sign_in: SignIn, sessions: Arc<SessionResolver>) -> Self {
        Self { sign_in, sessions }
    }

    pub(crate) fn sign_in(&self) -> &SignIn {
        &self.sign_in
    }

    /// Send a request built by `build`, which must attach the given token.
    ///
    /// Returns the response of the last attempt. Only a `401` on the fresh
    /// attempt is retried; the caller turns any remaining error status into
    /// an error.
    #[instrument(skip_all, fields(email = %self.sign_in.email()))]
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&SessionToken) -> RequestBuilder + Send + Sync,
    {
        let session = self.sessions.resolve(&self.sign_in).await?;
        let response = self.attempt(Attempt::Fresh, &session, &build).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        info!("Session rejected, reauthenticating");
        let session = self.sessions.replace(&self.sign_in, Some(&session)).await?;
        let response = self.attempt(Attempt::Retried, &session, &build).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Session rejected again after reauthenticating");
        }
        Ok(response)
    }

    async fn attempt<F>(&self, attempt: Attempt, session: &Session, build: &F) -> Result<Response>
    where
        F: Fn(&SessionToken) -> RequestBuilder + Send + Sync,
    {
        let response = build(session.token()).send().await?;
        debug!(%attempt, status = %response.status(), "authenticated request");
        Ok(response)
    }
}

impl fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("sign_in", &self.sign_in)
            .finish()
    }
}
