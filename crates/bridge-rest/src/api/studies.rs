use crate::Result;
use crate::cache::Service;
use crate::model::{ResourceList, StudySummary};
use crate::transport::Transport;

use super::endpoints::STUDIES;

/// Study operations. The listing is public, so the anonymous client works.
#[derive(Debug, Clone)]
pub struct StudiesApi {
    transport: Transport,
}

impl Service for StudiesApi {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl StudiesApi {
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// List the name and identifier of every study on the server.
    pub async fn get_study_summaries(&self) -> Result<ResourceList<StudySummary>> {
        self.transport
            .get_with_query(STUDIES, &[("summary", "true")])
            .await
    }
}
