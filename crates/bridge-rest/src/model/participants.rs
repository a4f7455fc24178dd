use std::fmt;

use serde::{Deserialize, Serialize};

/// Who a participant allows their data to be shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingScope {
    NoSharing,
    SponsorsAndPartners,
    AllQualifiedResearchers,
}

impl fmt::Display for SharingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SharingScope::NoSharing => "no_sharing",
            SharingScope::SponsorsAndPartners => "sponsors_and_partners",
            SharingScope::AllQualifiedResearchers => "all_qualified_researchers",
        };
        f.write_str(label)
    }
}

/// The participant record of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyParticipant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing_scope: Option<SharingScope>,
    #[serde(default)]
    pub data_groups: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}
