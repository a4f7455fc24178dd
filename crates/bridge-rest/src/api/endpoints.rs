//! REST endpoint paths and the error body shape.

use serde::Deserialize;

pub const SIGN_IN: &str = "/v3/auth/signIn";

pub const SIGN_OUT: &str = "/v3/auth/signOut";

/// Study listing. Public; summaries only with `summary=true`.
pub const STUDIES: &str = "/v3/studies";

pub const PARTICIPANTS_SELF: &str = "/v3/participants/self";

pub const SUBPOPULATIONS: &str = "/v3/subpopulations";

/// Where a consent signature for `guid` is posted.
pub fn consent_signature(guid: &str) -> String {
    format!("{SUBPOPULATIONS}/{guid}/consents/signature")
}

/// Body of an error response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}
