//! Agent API abstraction
//!
//! The tailer is written against this trait rather than the concrete HTTP
//! client so it can be driven by scripted agents in tests.

use async_trait::async_trait;
use strand_core::dto::{ContainerStatus, Flag, ReadFile};

use crate::AgentClient;
use crate::error::Result;

/// Operations of an agent's operator API used by the tailer
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Lists the containers running on the agent
    async fn get_containers(&self) -> Result<Vec<ContainerStatus>>;

    /// Returns the agent's configuration flags
    async fn get_flags(&self) -> Result<Vec<Flag>>;

    /// Reads a byte range of a sandbox file
    ///
    /// # Arguments
    /// * `path` - Absolute path of the file on the agent
    /// * `offset` - Byte offset to start reading at
    /// * `length` - Maximum number of bytes; `None` reads to the end of the file
    async fn read_file(&self, path: &str, offset: u64, length: Option<u64>) -> Result<ReadFile>;
}

#[async_trait]
impl AgentApi for AgentClient {
    async fn get_containers(&self) -> Result<Vec<ContainerStatus>> {
        AgentClient::get_containers(self).await
    }

    async fn get_flags(&self) -> Result<Vec<Flag>> {
        AgentClient::get_flags(self).await
    }

    async fn read_file(&self, path: &str, offset: u64, length: Option<u64>) -> Result<ReadFile> {
        AgentClient::read_file(self, path, offset, length).await
    }
}
