use serde::{Deserialize, Serialize};

/// A study as listed by the public study summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudySummary {
    pub name: String,
    pub identifier: String,
}
