//! The transport handle typed clients send requests through.

use std::sync::{Arc, Weak};

use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::api::endpoints::ErrorResponse;
use crate::auth::{CredentialKey, RequestAuthenticator, SESSION_HEADER};
use crate::config::BaseUrl;
use crate::error::{ApiError, AuthError, Error};
use crate::Result;

/// A configured channel to the Bridge server for one credential key.
///
/// Cloning is cheap and yields a handle to the same transport.
#[derive(Debug, Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

#[derive(Debug)]
pub(crate) struct TransportInner {
    http: reqwest::Client,
    base_url: BaseUrl,
    authenticator: Option<RequestAuthenticator>,
}

impl Transport {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: BaseUrl,
        authenticator: Option<RequestAuthenticator>,
    ) -> Self {
        Self {
            inner: Arc::new(TransportInner {
                http,
                base_url,
                authenticator,
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<TransportInner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &Weak<TransportInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Returns the server this transport talks to.
    pub fn base_url(&self) -> &BaseUrl {
        &self.inner.base_url
    }

    /// Returns the credential key requests are made as.
    pub fn credential_key(&self) -> CredentialKey {
        match &self.inner.authenticator {
            Some(authenticator) => CredentialKey::SignedIn(authenticator.sign_in().clone()),
            None => CredentialKey::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.authenticator.is_some()
    }

    /// Returns true if both handles refer to the same transport.
    pub fn same_transport(&self, other: &Transport) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Send a request without interpreting the response status.
    ///
    /// `customize` may be invoked twice when the request has to be resent
    /// after reauthenticating.
    pub(crate) async fn dispatch<F>(
        &self,
        method: Method,
        endpoint: &str,
        customize: F,
    ) -> Result<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync,
    {
        let url = self.inner.base_url.endpoint(endpoint);
        debug!(%method, endpoint, "dispatching request");
        let request = || customize(self.inner.http.request(method.clone(), &url));

        let response = match &self.inner.authenticator {
            Some(authenticator) => {
                authenticator
                    .send(|token| request().header(SESSION_HEADER, token.as_str()))
                    .await?
            }
            None => request().send().await?,
        };

        trace!(status = %response.status(), "response");
        Ok(response)
    }

    /// Send a request and turn error statuses into [`Error`]s.
    pub async fn execute<F>(&self, method: Method, endpoint: &str, customize: F) -> Result<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync,
    {
        let response = self.dispatch(method, endpoint, customize).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response, endpoint).await)
        }
    }

    /// GET an endpoint and decode its JSON body.
    #[instrument(skip(self), fields(key = %self.credential_key()))]
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(Method::GET, endpoint, |request| request).await?;
        Ok(response.json::<R>().await?)
    }

    /// GET an endpoint with query parameters and decode its JSON body.
    #[instrument(skip(self), fields(key = %self.credential_key()))]
    pub async fn get_with_query<Q, R>(&self, endpoint: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .execute(Method::GET, endpoint, |request| request.query(query))
            .await?;
        Ok(response.json::<R>().await?)
    }

    /// POST a JSON body to an endpoint whose response body is ignored.
    #[instrument(skip(self, body), fields(key = %self.credential_key()))]
    pub async fn post_no_response<B>(&self, endpoint: &str, body: &B) -> Result<()>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.execute(Method::POST, endpoint, |request| request.json(body))
            .await?;
        Ok(())
    }

    /// POST without a body, ignoring the response body.
    #[instrument(skip(self), fields(key = %self.credential_key()))]
    pub async fn post_empty(&self, endpoint: &str) -> Result<()> {
        self.execute(Method::POST, endpoint, |request| request)
            .await?;
        Ok(())
    }
}

/// Normalize an error response into the error catalog.
///
/// `401` means the session (or lack of one) was rejected; every other status
/// becomes an [`ApiError`].
pub(crate) async fn error_from_response(response: Response, endpoint: &str) -> Error {
    let status = response.status().as_u16();

    let (error_type, message) = match response.json::<ErrorResponse>().await {
        Ok(body) => (body.error_type, body.message),
        Err(_) => (None, None),
    };

    if status == 401 {
        AuthError::NotAuthenticated { message }.into()
    } else {
        ApiError::new(status, error_type.as_deref(), message, endpoint).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::ApiErrorKind;

    fn anonymous(server: &MockServer) -> Transport {
        let base = BaseUrl::new(server.uri()).unwrap();
        Transport::new(reqwest::Client::new(), base, None)
    }

    #[tokio::test]
    async fn anonymous_transport_sends_no_session_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/studies"))
            .and(header_exists(SESSION_HEADER))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3/studies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let transport = anonymous(&server);
        let body: serde_json::Value = transport.get("/v3/studies").await.unwrap();
        assert_eq!(body, json!({"items": []}));
        assert!(!transport.is_authenticated());
        assert_eq!(transport.credential_key(), CredentialKey::Anonymous);
    }

    #[tokio::test]
    async fn error_body_is_normalized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/participants/self"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "statusCode": 404,
                "message": "Account not found.",
                "type": "EntityNotFoundException"
            })))
            .mount(&server)
            .await;

        let err = anonymous(&server)
            .get::<serde_json::Value>("/v3/participants/self")
            .await
            .unwrap_err();
        let api = err.as_api_error().unwrap();
        assert_eq!(api.kind, ApiErrorKind::EntityNotFound);
        assert_eq!(api.message.as_deref(), Some("Account not found."));
        assert_eq!(api.endpoint, "/v3/participants/self");
    }

    #[tokio::test]
    async fn non_json_error_body_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/auth/signOut"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string("Service Unavailable")
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&server)
            .await;

        let err = anonymous(&server)
            .post_empty("/v3/auth/signOut")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
        assert_eq!(err.as_api_error().unwrap().kind, ApiErrorKind::ServerError);
    }

    #[tokio::test]
    async fn unauthorized_on_anonymous_transport_is_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/participants/self"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Not signed in."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = anonymous(&server)
            .get::<serde_json::Value>("/v3/participants/self")
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert!(err.to_string().contains("Not signed in."));
    }

    #[tokio::test]
    async fn query_parameters_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/studies"))
            .and(wiremock::matchers::query_param("summary", "true"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let transport = anonymous(&server);
        let _: serde_json::Value = transport
            .execute(Method::GET, "/v3/studies", |request| {
                request
                    .query(&[("summary", "true")])
                    .header("accept", "application/json")
            })
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        let base = BaseUrl::new("http://127.0.0.1:9").unwrap();
        let transport = Transport::new(reqwest::Client::new(), base, None);

        let err = transport
            .get::<serde_json::Value>("/v3/studies")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.is_auth_failure());
    }
}
