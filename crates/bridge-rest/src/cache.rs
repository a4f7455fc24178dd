//! The client cache.
//!
//! [`ClientCache`] is the entry point of the library. It hands out typed
//! service clients per credential key and reuses them, and the transports
//! behind them, for as long as the application keeps them alive. The cache
//! itself only holds weak references, so dropping the last client of an
//! account releases its transport.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::Result;
use crate::auth::{CredentialKey, Session, SignIn, SignInExchange};
use crate::config::ClientConfig;
use crate::transport::{Transport, TransportFactory, TransportInner};

/// A typed facade over a group of remote operations.
///
/// Implementations are plain wrappers around the [`Transport`] they are
/// built from. Construction must not perform I/O.
pub trait Service: Send + Sync + 'static {
    fn from_transport(transport: Transport) -> Self;
}

type ClientMap = HashMap<TypeId, Weak<dyn Any + Send + Sync>>;

/// Per-credential cache of transports and typed service clients.
///
/// # Thread Safety
///
/// `ClientCache` is `Send + Sync`; share it behind an `Arc`. Lookups and
/// construction happen under a lock, so concurrent callers asking for the
/// same client for the same key all receive one instance.
///
/// # Example
///
/// ```no_run
/// use bridge_rest::{ClientCache, ClientConfig, CredentialKey, SignIn};
/// use bridge_rest::api::ParticipantsApi;
///
/// # fn example() -> Result<(), bridge_rest::Error> {
/// let cache = ClientCache::new(ClientConfig::new("https://webservices.sagebridge.org")?)?;
/// let key = CredentialKey::from(SignIn::new("api", "alice@example.org", "P4ssword"));
///
/// let first = cache.get_client::<ParticipantsApi>(&key);
/// let second = cache.get_client::<ParticipantsApi>(&key);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// # Ok(())
/// # }
/// ```
pub struct ClientCache {
    factory: TransportFactory,
    transports: Mutex<HashMap<CredentialKey, Weak<TransportInner>>>,
    clients: Mutex<HashMap<CredentialKey, ClientMap>>,
}

impl ClientCache {
    /// Create a cache for the configured server.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_factory(TransportFactory::new(&config)?))
    }

    /// Create a cache that signs in through a custom exchange.
    pub fn with_exchange(config: ClientConfig, exchange: Arc<dyn SignInExchange>) -> Result<Self> {
        Ok(Self::with_factory(TransportFactory::with_exchange(
            &config, exchange,
        )?))
    }

    pub fn with_factory(factory: TransportFactory) -> Self {
        Self {
            factory,
            transports: Mutex::new(HashMap::new()),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the client of type `S` for `key`, building it on first use.
    ///
    /// While the returned client (or a clone of the `Arc`) is alive, every
    /// call with the same key and type returns the same instance.
    #[instrument(skip_all, fields(%key, service = std::any::type_name::<S>()))]
    pub fn get_client<S: Service>(&self, key: &CredentialKey) -> Arc<S> {
        let service = TypeId::of::<S>();
        let mut clients = self.clients.lock();

        let live = clients
            .get(key)
            .and_then(|per_key| per_key.get(&service))
            .and_then(Weak::upgrade)
            .and_then(|client| client.downcast::<S>().ok());
        if let Some(client) = live {
            debug!("client cache hit");
            return client;
        }

        debug!("client cache miss");
        let transport = self.transport(key);
        let client = Arc::new(S::from_transport(transport));
        let erased: Arc<dyn Any + Send + Sync> = client.clone();

        clients.retain(|_, per_key| {
            per_key.retain(|_, client| client.strong_count() > 0);
            !per_key.is_empty()
        });
        clients
            .entry(key.clone())
            .or_default()
            .insert(service, Arc::downgrade(&erased));

        client
    }

    /// Returns an unauthenticated client of type `S`.
    pub fn anonymous_client<S: Service>(&self) -> Arc<S> {
        self.get_client(&CredentialKey::Anonymous)
    }

    /// Returns the account's session, signing in if none is memoized.
    pub async fn session(&self, sign_in: &SignIn) -> Result<Arc<Session>> {
        self.factory.sessions().resolve(sign_in).await
    }

    /// Sign the account out on the server and forget its session.
    ///
    /// Clients for the key stay usable; their next request signs in again.
    pub async fn sign_out(&self, key: &CredentialKey) -> Result<()> {
        match key.sign_in() {
            Some(sign_in) => self.factory.sessions().sign_out(sign_in).await,
            None => Ok(()),
        }
    }

    /// Returns the live transport for `key`, or builds one.
    ///
    /// Dead entries of other keys are dropped along the way, together with
    /// the sessions memoized for them.
    fn transport(&self, key: &CredentialKey) -> Transport {
        if key.is_anonymous() {
            return self.factory.build(key);
        }

        let mut transports = self.transports.lock();
        if let Some(transport) = transports.get(key).and_then(Transport::upgrade) {
            return transport;
        }

        transports.retain(|cached, transport| {
            let live = cached == key || transport.strong_count() > 0;
            if !live && let Some(sign_in) = cached.sign_in() {
                debug!(key = %cached, "releasing unused credential");
                self.factory.sessions().invalidate(sign_in);
            }
            live
        });

        let transport = self.factory.build(key);
        transports.insert(key.clone(), transport.downgrade());
        transport
    }
}

impl std::fmt::Debug for ClientCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCache")
            .field("factory", &self.factory)
            .field("transports", &self.transports.lock().len())
            .finish()
    }
}
