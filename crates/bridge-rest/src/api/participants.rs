use crate::Result;
use crate::cache::Service;
use crate::model::StudyParticipant;
use crate::transport::Transport;

use super::endpoints::PARTICIPANTS_SELF;

/// Operations on the signed-in participant's own record.
#[derive(Debug, Clone)]
pub struct ParticipantsApi {
    transport: Transport,
}

impl Service for ParticipantsApi {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl ParticipantsApi {
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub async fn get_self(&self) -> Result<StudyParticipant> {
        self.transport.get(PARTICIPANTS_SELF).await
    }
}
