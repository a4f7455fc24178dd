//! Wire types exchanged with the Bridge server.
//!
//! All bodies are JSON with camelCase field names. Types only derive what
//! they are used for: request bodies serialize, responses deserialize.

mod auth;
pub mod base64_bytes;
mod participants;
mod studies;
mod subpopulations;

use serde::{Deserialize, Serialize};

pub use auth::UserSessionInfo;
pub use participants::{SharingScope, StudyParticipant};
pub use studies::StudySummary;
pub use subpopulations::{ConsentSignature, Subpopulation, SubpopulationGuid};

/// A list response.
///
/// Some endpoints report a total alongside the items, others don't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> ResourceList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_list_total_is_optional() {
        let list: ResourceList<StudySummary> = serde_json::from_value(json!({
            "items": [{"name": "API Study", "identifier": "api"}]
        }))
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.total, None);

        let list: ResourceList<StudySummary> =
            serde_json::from_value(json!({"items": [], "total": 0})).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.total, Some(0));
    }
}
