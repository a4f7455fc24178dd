//! Session resolution with per-account single-flight sign-in.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::api::endpoints::{SIGN_IN, SIGN_OUT};
use crate::error::AuthError;
use crate::model::UserSessionInfo;
use crate::transport::{Transport, error_from_response};

use super::SESSION_HEADER;
use super::credentials::SignIn;
use super::session::Session;

/// The remote sign-in exchange.
///
/// [`HttpSignInExchange`] is the production implementation; tests can
/// supply their own to count or script sign-ins.
#[async_trait]
pub trait SignInExchange: Send + Sync {
    /// Exchange credentials for a new session.
    async fn sign_in(&self, sign_in: &SignIn) -> Result<Session>;

    /// End a session on the server.
    async fn sign_out(&self, session: &Session) -> Result<()>;
}

/// Signs in through the `/v3/auth` endpoints over an unauthenticated
/// transport.
#[derive(Debug, Clone)]
pub struct HttpSignInExchange {
    transport: Transport,
}

impl HttpSignInExchange {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl SignInExchange for HttpSignInExchange {
    #[instrument(skip_all, fields(study = %sign_in.study(), email = %sign_in.email()))]
    async fn sign_in(&self, sign_in: &SignIn) -> Result<Session> {
        let response = self
            .transport
            .dispatch(Method::POST, SIGN_IN, |request| request.json(sign_in))
            .await?;

        let status = response.status();
        // A consent-required answer still carries a usable session.
        if status.is_success() || status == StatusCode::PRECONDITION_FAILED {
            let info: UserSessionInfo = response.json().await?;
            debug!(consented = info.consented, "sign-in exchange succeeded");
            return Ok(Session::from_user_session_info(sign_in.clone(), info));
        }

        match error_from_response(response, SIGN_IN).await {
            crate::Error::Auth(AuthError::NotAuthenticated { message }) => {
                Err(AuthError::SignInRejected {
                    status: status.as_u16(),
                    message,
                }
                .into())
            }
            crate::Error::Api(err) if matches!(err.status, 400 | 403 | 404) => {
                Err(AuthError::SignInRejected {
                    status: err.status,
                    message: err.message,
                }
                .into())
            }
            other => Err(other),
        }
    }

    #[instrument(skip_all, fields(email = %session.sign_in().email()))]
    async fn sign_out(&self, session: &Session) -> Result<()> {
        let token = session.token().as_str();
        let response = self
            .transport
            .dispatch(Method::POST, SIGN_OUT, |request| {
                request.header(SESSION_HEADER, token)
            })
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response, SIGN_OUT).await)
        }
    }
}

/// One sign-in exchange and everyone waiting on it.
///
/// The cell holds the outcome, failures included, so callers that joined
/// while the exchange ran all see the same result.
type Flight = Arc<OnceCell<Result<Arc<Session>>>>;

/// Resolves sessions for signed-in credentials.
///
/// The last known-good session per [`SignIn`] is memoized until it is
/// replaced by [`refresh`](Self::refresh) or dropped by
/// [`invalidate`](Self::invalidate). At most one sign-in exchange per
/// account is in flight at any time; concurrent callers wait for it and
/// share its result, whether it succeeded or not.
pub struct SessionResolver {
    exchange: Arc<dyn SignInExchange>,
    sessions: Mutex<HashMap<SignIn, Arc<Session>>>,
    in_flight: Mutex<HashMap<SignIn, Flight>>,
}

enum Joined {
    Current(Arc<Session>),
    Flight(Flight),
}

impl SessionResolver {
    pub fn new(exchange: Arc<dyn SignInExchange>) -> Self {
        Self {
            exchange,
            sessions: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the memoized session, signing in if there is none.
    #[instrument(skip_all, fields(study = %sign_in.study(), email = %sign_in.email()))]
    pub async fn resolve(&self, sign_in: &SignIn) -> Result<Arc<Session>> {
        if let Some(session) = self.cached(sign_in) {
            return Ok(session);
        }

        self.single_flight(sign_in, |_| true).await
    }

    /// Signs in again, replacing the memoized session.
    ///
    /// If another sign-in for the same account is running or finished
    /// after the memoized session was read, its result is returned instead
    /// of signing in a second time.
    #[instrument(skip_all, fields(study = %sign_in.study(), email = %sign_in.email()))]
    pub async fn refresh(&self, sign_in: &SignIn) -> Result<Arc<Session>> {
        let seen = self.cached(sign_in);
        self.replace(sign_in, seen.as_ref()).await
    }

    /// Replaces `stale` with a fresh session unless it was already replaced.
    pub(crate) async fn replace(
        &self,
        sign_in: &SignIn,
        stale: Option<&Arc<Session>>,
    ) -> Result<Arc<Session>> {
        self.single_flight(sign_in, |current| {
            stale.is_none_or(|stale| !Arc::ptr_eq(current, stale))
        })
        .await
    }

    /// Forget the memoized session for an account.
    pub fn invalidate(&self, sign_in: &SignIn) {
        if self.sessions.lock().remove(sign_in).is_some() {
            debug!(email = %sign_in.email(), "session invalidated");
        }
    }

    /// Sign the account out remotely and forget its session.
    ///
    /// Does nothing when no session is memoized.
    #[instrument(skip_all, fields(study = %sign_in.study(), email = %sign_in.email()))]
    pub async fn sign_out(&self, sign_in: &SignIn) -> Result<()> {
        let Some(session) = self.sessions.lock().remove(sign_in) else {
            return Ok(());
        };
        info!("Signing out");
        self.exchange.sign_out(&session).await
    }

    /// Returns the memoized session without signing in.
    pub fn cached(&self, sign_in: &SignIn) -> Option<Arc<Session>> {
        self.sessions.lock().get(sign_in).cloned()
    }

    /// Joins the account's running sign-in, or starts one unless `reuse`
    /// accepts the memoized session.
    async fn single_flight<F>(&self, sign_in: &SignIn, reuse: F) -> Result<Arc<Session>>
    where
        F: Fn(&Arc<Session>) -> bool,
    {
        let flight = match self.join(sign_in, reuse) {
            Joined::Current(session) => {
                debug!("reusing session from concurrent sign-in");
                return Ok(session);
            }
            Joined::Flight(flight) => flight,
        };

        let result = flight.get_or_init(|| self.sign_in(sign_in)).await.clone();
        self.land(sign_in, &flight);
        result
    }

    fn join<F>(&self, sign_in: &SignIn, reuse: F) -> Joined
    where
        F: Fn(&Arc<Session>) -> bool,
    {
        let mut in_flight = self.in_flight.lock();
        if let Some(flight) = in_flight.get(sign_in) {
            return Joined::Flight(Arc::clone(flight));
        }

        // A finished flight memoizes its session before it is removed, so
        // this sees the outcome of every flight that is no longer listed.
        if let Some(current) = self.cached(sign_in)
            && reuse(&current)
        {
            return Joined::Current(current);
        }

        let flight = Flight::default();
        in_flight.insert(sign_in.clone(), Arc::clone(&flight));
        Joined::Flight(flight)
    }

    /// Removes a finished flight so the next caller starts a new one.
    fn land(&self, sign_in: &SignIn, flight: &Flight) {
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(sign_in)
            .is_some_and(|listed| Arc::ptr_eq(listed, flight))
        {
            in_flight.remove(sign_in);
        }
    }

    async fn sign_in(&self, sign_in: &SignIn) -> Result<Arc<Session>> {
        info!(email = %sign_in.email(), "Signing in");
        let session = Arc::new(self.exchange.sign_in(sign_in).await?);
        self.sessions
            .lock()
            .insert(sign_in.clone(), Arc::clone(&session));
        Ok(session)
    }
}

impl std::fmt::Debug for SessionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionResolver")
            .field("sessions", &self.sessions.lock().len())
            .finish()
    }
}
