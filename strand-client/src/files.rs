//! File-related calls

use crate::AgentClient;
use crate::error::{ClientError, Result};
use strand_core::dto::{Call, ReadFile};

impl AgentClient {
    /// Read a byte range of a file in the agent's sandbox
    ///
    /// # Arguments
    /// * `path` - Absolute path of the file on the agent
    /// * `offset` - Byte offset to start reading at
    /// * `length` - Maximum number of bytes; `None` reads to the end of the file
    ///
    /// # Returns
    /// The bytes read and the file's current total size. `Some(0)` as length
    /// returns no data and can be used to probe the size.
    pub async fn read_file(&self, path: &str, offset: u64, length: Option<u64>) -> Result<ReadFile> {
        let response = self.call(&Call::read_file(path, offset, length)).await?;

        response
            .read_file
            .ok_or_else(|| ClientError::UnexpectedResponse("READ_FILE response without payload".into()))
    }
}
