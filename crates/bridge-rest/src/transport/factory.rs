//! Builds transports for credential keys.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::Result;
use crate::auth::{
    CredentialKey, HttpSignInExchange, RequestAuthenticator, SessionResolver, SignInExchange,
};
use crate::config::{BaseUrl, ClientConfig};
use crate::error::{InvalidInputError, TransportError};

use super::client::Transport;

/// Builds [`Transport`]s that share one connection pool.
///
/// Every transport sends the configured identification headers. Transports
/// for signed-in keys additionally carry a request authenticator backed by
/// the factory's [`SessionResolver`]. Building a transport never touches the
/// network.
#[derive(Debug)]
pub struct TransportFactory {
    http: reqwest::Client,
    base_url: BaseUrl,
    anonymous: Transport,
    sessions: Arc<SessionResolver>,
    built: AtomicUsize,
}

impl TransportFactory {
    /// Create a factory that signs in over its own anonymous transport.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = build_http_client(config)?;
        let anonymous = Transport::new(http.clone(), config.base_url.clone(), None);
        let exchange = HttpSignInExchange::new(anonymous.clone());
        Ok(Self::assemble(
            http,
            config.base_url.clone(),
            anonymous,
            Arc::new(exchange),
        ))
    }

    /// Create a factory with a custom sign-in exchange.
    pub fn with_exchange(config: &ClientConfig, exchange: Arc<dyn SignInExchange>) -> Result<Self> {
        let http = build_http_client(config)?;
        let anonymous = Transport::new(http.clone(), config.base_url.clone(), None);
        Ok(Self::assemble(http, config.base_url.clone(), anonymous, exchange))
    }

    fn assemble(
        http: reqwest::Client,
        base_url: BaseUrl,
        anonymous: Transport,
        exchange: Arc<dyn SignInExchange>,
    ) -> Self {
        Self {
            http,
            base_url,
            anonymous,
            sessions: Arc::new(SessionResolver::new(exchange)),
            built: AtomicUsize::new(0),
        }
    }

    /// Returns a transport for `key`.
    ///
    /// The anonymous key always yields the same shared transport; every
    /// other key yields a newly built one.
    pub fn build(&self, key: &CredentialKey) -> Transport {
        match key {
            CredentialKey::Anonymous => self.anonymous.clone(),
            CredentialKey::SignedIn(sign_in) => {
                self.built.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "building authenticated transport");
                let authenticator =
                    RequestAuthenticator::new(sign_in.clone(), Arc::clone(&self.sessions));
                Transport::new(self.http.clone(), self.base_url.clone(), Some(authenticator))
            }
        }
    }

    /// The resolver shared by all authenticated transports.
    pub fn sessions(&self) -> &Arc<SessionResolver> {
        &self.sessions
    }

    /// Number of authenticated transports built so far.
    pub fn transports_built(&self) -> usize {
        self.built.load(Ordering::Relaxed)
    }
}

fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|_| InvalidInputError::Header { header: "User-Agent" })?,
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language).map_err(|_| InvalidInputError::Header {
            header: "Accept-Language",
        })?,
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(TransportError::from)?;
    Ok(client)
}
