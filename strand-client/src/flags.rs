//! Flag-related calls

use crate::AgentClient;
use crate::error::{ClientError, Result};
use strand_core::dto::{Call, Flag};

impl AgentClient {
    /// Get the agent's configuration flags
    pub async fn get_flags(&self) -> Result<Vec<Flag>> {
        let response = self.call(&Call::GetFlags).await?;

        response
            .get_flags
            .map(|payload| payload.flags)
            .ok_or_else(|| ClientError::UnexpectedResponse("GET_FLAGS response without payload".into()))
    }
}
