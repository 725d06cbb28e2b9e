//! File poller
//!
//! Drives the tail over an already resolved path: one size probe to position
//! the cursor near the end of the file, then reads of everything past the
//! cursor.

use strand_client::{AgentApi, ClientError};
use tracing::{debug, warn};

use super::cursor::TailCursor;
use super::record::Attribution;
use crate::error::TailError;

/// Phase of a poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// The cursor has not been positioned yet
    Discovering,
    /// Reading appended content
    Streaming,
}

/// Outcome of a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// The size probe ran and positioned the cursor
    Discovered { size: u64, offset: u64 },
    /// Appended content was read; `records` may be empty
    Streamed { records: Vec<String> },
}

/// Stateful reader of one remote file
#[derive(Debug)]
pub struct Poller {
    path: String,
    cursor: TailCursor,
    state: PollState,
    tail_window: u64,
}

impl Poller {
    /// Creates a poller for `path`
    ///
    /// # Arguments
    /// * `path` - Absolute path of the file on the agent
    /// * `tail_window` - Bytes of pre-existing content to replay at most
    pub fn new(path: impl Into<String>, tail_window: u64) -> Self {
        Self {
            path: path.into(),
            cursor: TailCursor::new(),
            state: PollState::Discovering,
            tail_window,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn offset(&self) -> u64 {
        self.cursor.offset()
    }

    fn report_read_error(&self, error: &ClientError) {
        if error.is_not_found() {
            warn!("{} no longer exists on the agent", self.path);
        } else if error.is_server_error() {
            warn!("Agent failed to read {}: {}", self.path, error);
        }
    }

    /// Performs one agent read
    ///
    /// The first call probes the file size with a zero-length read and never
    /// yields records. Every later call reads from the cursor to the end of the
    /// file and moves the cursor to the reported size.
    pub async fn poll_once(
        &mut self,
        api: &dyn AgentApi,
        attribution: &Attribution,
    ) -> Result<PollStep, TailError> {
        match self.state {
            PollState::Discovering => {
                let probe = api.read_file(&self.path, self.cursor.offset(), Some(0)).await?;

                self.cursor.discover(probe.size, self.tail_window);
                self.state = PollState::Streaming;

                debug!(
                    "{} is {} bytes, tailing from offset {}",
                    self.path,
                    probe.size,
                    self.cursor.offset()
                );

                Ok(PollStep::Discovered {
                    size: probe.size,
                    offset: self.cursor.offset(),
                })
            }
            PollState::Streaming => {
                let offset = self.cursor.offset();
                let chunk = api
                    .read_file(&self.path, offset, None)
                    .await
                    .inspect_err(|e| self.report_read_error(e))?;

                self.cursor.advance(chunk.size);

                let records = if chunk.data.is_empty() {
                    Vec::new()
                } else {
                    debug!(
                        "Read {} bytes of {} at offset {}",
                        chunk.data.len(),
                        self.path,
                        offset
                    );
                    attribution.records(&chunk.data)
                };

                Ok(PollStep::Streamed { records })
            }
        }
    }
}
