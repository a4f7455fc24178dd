//! Mock Bridge server fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use bridge_rest::{ClientCache, ClientConfig, CredentialKey, SignIn};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const STUDY: &str = "api";
pub const PASSWORD: &str = "P4ssword";

pub fn alice() -> SignIn {
    SignIn::new(STUDY, "alice@example.org", PASSWORD)
}

pub fn bob() -> SignIn {
    SignIn::new(STUDY, "bob@example.org", PASSWORD)
}

pub fn key(sign_in: SignIn) -> CredentialKey {
    CredentialKey::from(sign_in)
}

pub fn cache(server: &MockServer) -> ClientCache {
    let config = ClientConfig::new(server.uri()).unwrap();
    ClientCache::new(config).unwrap()
}

/// Answers every sign-in with the next token of `t1`, `t2`, ...
pub struct IssueSessions {
    status: u16,
    consented: bool,
    issued: AtomicUsize,
}

impl IssueSessions {
    pub fn ok() -> Self {
        Self {
            status: 200,
            consented: true,
            issued: AtomicUsize::new(0),
        }
    }

    /// Sessions issued with `412 Precondition Failed` for an account that
    /// has not consented yet.
    pub fn consent_required() -> Self {
        Self {
            status: 412,
            consented: false,
            issued: AtomicUsize::new(0),
        }
    }
}

impl Respond for IssueSessions {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        ResponseTemplate::new(self.status).set_body_json(json!({
            "sessionToken": format!("t{n}"),
            "authenticated": true,
            "consented": self.consented,
            "id": "user-1",
            "roles": [],
            "dataGroups": []
        }))
    }
}

pub async fn mount_sign_in(server: &MockServer, responder: IssueSessions) {
    Mock::given(method("POST"))
        .and(path("/v3/auth/signIn"))
        .respond_with(responder)
        .mount(server)
        .await;
}

/// Number of requests the server received for `endpoint`.
pub async fn requests_to(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == endpoint)
        .count()
}

pub async fn sign_ins(server: &MockServer) -> usize {
    requests_to(server, "/v3/auth/signIn").await
}

pub fn participant_body() -> serde_json::Value {
    json!({
        "id": "user-1",
        "email": "alice@example.org",
        "firstName": "Alice",
        "sharingScope": "no_sharing",
        "dataGroups": [],
        "roles": []
    })
}
