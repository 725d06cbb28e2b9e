//! Container-related calls

use crate::AgentClient;
use crate::error::{ClientError, Result};
use strand_core::dto::{Call, ContainerStatus};

impl AgentClient {
    /// List the containers running on the agent
    ///
    /// # Returns
    /// One entry per container, carrying the executor it belongs to
    pub async fn get_containers(&self) -> Result<Vec<ContainerStatus>> {
        let response = self.call(&Call::GetContainers).await?;

        response
            .get_containers
            .map(|payload| payload.containers)
            .ok_or_else(|| {
                ClientError::UnexpectedResponse("GET_CONTAINERS response without payload".into())
            })
    }
}
