use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SharingScope;
use super::base64_bytes;

/// Identifies a consent group within a study.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubpopulationGuid(String);

impl SubpopulationGuid {
    pub fn new(guid: impl Into<String>) -> Self {
        Self(guid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubpopulationGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubpopulationGuid {
    fn from(guid: &str) -> Self {
        Self::new(guid)
    }
}

/// A consent group: participants matching it must sign its consent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subpopulation {
    pub guid: SubpopulationGuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_group: bool,
}

/// A participant's signature on a subpopulation's consent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSignature {
    pub name: String,
    pub birthdate: NaiveDate,
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_mime_type: Option<String>,
    pub scope: SharingScope,
}

impl ConsentSignature {
    pub fn new(name: impl Into<String>, birthdate: NaiveDate, scope: SharingScope) -> Self {
        Self {
            name: name.into(),
            birthdate,
            image_data: None,
            image_mime_type: None,
            scope,
        }
    }

    /// Attach an image of the signature.
    pub fn with_image(mut self, data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        self.image_data = Some(data);
        self.image_mime_type = Some(mime_type.into());
        self
    }
}
