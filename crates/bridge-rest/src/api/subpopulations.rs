use crate::Result;
use crate::cache::Service;
use crate::model::{ConsentSignature, ResourceList, Subpopulation, SubpopulationGuid};
use crate::transport::Transport;

use super::endpoints::{SUBPOPULATIONS, consent_signature};

/// Consent groups and consenting to them.
#[derive(Debug, Clone)]
pub struct SubpopulationsApi {
    transport: Transport,
}

impl Service for SubpopulationsApi {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl SubpopulationsApi {
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub async fn get_subpopulations(&self) -> Result<ResourceList<Subpopulation>> {
        self.transport.get(SUBPOPULATIONS).await
    }

    /// Sign the consent of `guid` on behalf of the signed-in participant.
    pub async fn consent_to_research(
        &self,
        guid: &SubpopulationGuid,
        signature: &ConsentSignature,
    ) -> Result<()> {
        self.transport
            .post_no_response(&consent_signature(guid.as_str()), signature)
            .await
    }
}
