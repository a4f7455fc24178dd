//! Client configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Default request timeout applied to every transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `Accept-Language` header value.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US";

/// The root URL of a Bridge server, validated and without a trailing slash.
///
/// The URL must be absolute and use HTTPS (HTTP is allowed for localhost so
/// tests can run against a local mock server). Query strings and fragments
/// are rejected since endpoint paths are appended to the root.
///
/// # Example
///
/// ```
/// use bridge_rest::BaseUrl;
///
/// let base = BaseUrl::new("https://webservices.sagebridge.org/").unwrap();
/// assert_eq!(base.as_str(), "https://webservices.sagebridge.org");
/// assert_eq!(base.endpoint("/v3/auth/signIn"),
///            "https://webservices.sagebridge.org/v3/auth/signIn");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl {
    root: String,
}

impl BaseUrl {
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason,
        };

        let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
        server_root_problem(&url).map_err(|reason| invalid(reason.to_string()))?;

        Ok(Self {
            root: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the absolute URL of an endpoint path such as `/v3/studies`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.root
    }
}

fn server_root_problem(url: &Url) -> Result<(), &'static str> {
    let Some(host) = url.host_str() else {
        return Err("must be an absolute URL with a host");
    };

    match url.scheme() {
        "https" => {}
        "http" if matches!(host, "localhost" | "127.0.0.1" | "[::1]") => {}
        _ => return Err("must use HTTPS (HTTP allowed only for localhost)"),
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err("must not carry a query or fragment");
    }
    Ok(())
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.root)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Settings shared by every transport a [`ClientCache`](crate::ClientCache)
/// builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub user_agent: String,
    pub accept_language: String,
    #[serde(with = "timeout_secs")]
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the given server with default headers and timeout.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self::with_base_url(BaseUrl::new(base_url)?))
    }

    pub fn with_base_url(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            user_agent: concat!("bridge-rest/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = accept_language.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
