//! Task file listener
//!
//! Binds one file of one task to the agent running it, resolves where the
//! file lives and streams every new non-blank line to a channel.

mod cursor;
mod poller;
mod record;
mod resolver;

#[cfg(test)]
mod testing;

pub use cursor::TailCursor;
pub use poller::{PollState, PollStep, Poller};
pub use record::{Attribution, format_record};
pub use resolver::{ResolvedLocation, WORK_DIR_FLAG, compose_path, resolve};

use std::time::Duration;

use strand_client::{AgentApi, AgentClient, ClientError};
use strand_core::domain::agent::AgentInfo;
use strand_core::domain::task::Task;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::TailError;
use crate::shutdown::Shutdown;

/// Default pause between two reads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default number of bytes of existing content replayed when a tail starts
pub const DEFAULT_TAIL_WINDOW: u64 = 2000;

/// Connect timeout of the HTTP client a listener builds for itself
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Tuning knobs of a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailSettings {
    /// Fixed pause after each read; there is no adaptive backoff
    pub poll_interval: Duration,

    /// Bytes of pre-existing content to show at most
    pub tail_window: u64,
}

impl Default for TailSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            tail_window: DEFAULT_TAIL_WINDOW,
        }
    }
}

/// How a listener stopped without failing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailOutcome {
    /// The shutdown signal was triggered
    Cancelled,
    /// The receiving side of the sink was dropped
    SinkClosed,
}

/// Tails one file of one task
pub struct Listener {
    api: Box<dyn AgentApi>,
    task: Task,
    agent: AgentInfo,
    file_name: String,
    attribution: Attribution,
    settings: TailSettings,
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("task", &self.task)
            .field("agent", &self.agent)
            .field("file_name", &self.file_name)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Listener {
    /// Creates a listener with its own HTTP client for the agent
    ///
    /// # Arguments
    /// * `file_name` - File in the task's sandbox, e.g. `stdout`
    /// * `task` - The task whose file is tailed
    /// * `agent` - The agent the task was assigned to
    ///
    /// # Errors
    /// `AgentMismatch` if the task was assigned to another agent,
    /// `NoPublishedEndpoint` if the task has no endpoint to attribute output to.
    pub fn new(
        file_name: impl Into<String>,
        task: Task,
        agent: AgentInfo,
    ) -> Result<Self, TailError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(ClientError::from)?;
        let client = AgentClient::for_agent(&agent, http);

        Self::with_api(file_name, task, agent, client)
    }

    /// Creates a listener talking to the agent through `api`
    pub fn with_api(
        file_name: impl Into<String>,
        task: Task,
        agent: AgentInfo,
        api: impl AgentApi + 'static,
    ) -> Result<Self, TailError> {
        if task.agent_id != agent.id {
            return Err(TailError::AgentMismatch {
                task_id: task.task_id.clone(),
                task_agent: task.agent_id.clone(),
                agent: agent.id.clone(),
            });
        }

        let endpoint = task
            .attribution_endpoint()
            .ok_or_else(|| TailError::NoPublishedEndpoint {
                task_id: task.task_id.clone(),
            })?;
        let attribution = Attribution::new(agent.hostname.clone(), endpoint.port);

        Ok(Self {
            api: Box::new(api),
            task,
            agent,
            file_name: file_name.into(),
            attribution,
            settings: TailSettings::default(),
        })
    }

    /// Replaces the default settings
    pub fn with_settings(mut self, settings: TailSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn agent(&self) -> &AgentInfo {
        &self.agent
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn settings(&self) -> &TailSettings {
        &self.settings
    }

    /// Looks up where the file lives on the agent
    pub async fn resolve(&self) -> Result<ResolvedLocation, TailError> {
        resolve(self.api.as_ref(), &self.task, &self.agent, &self.file_name).await
    }

    /// Resolves the file, then streams new lines into `sink` until stopped
    ///
    /// Every agent call, the pause between reads and each send are abandoned as
    /// soon as `shutdown` triggers. Errors are returned as they occur; nothing
    /// is retried.
    pub async fn run(
        &self,
        sink: mpsc::Sender<String>,
        shutdown: Shutdown,
    ) -> Result<TailOutcome, TailError> {
        let location = tokio::select! {
            biased;
            _ = shutdown.wait() => return Ok(TailOutcome::Cancelled),
            resolved = self.resolve() => resolved?,
        };

        info!(
            "Tailing {} of task {} on agent {}",
            location.path, self.task.task_id, self.agent
        );

        let mut poller = Poller::new(location.path, self.settings.tail_window);

        loop {
            let step = tokio::select! {
                biased;
                _ = shutdown.wait() => return Ok(TailOutcome::Cancelled),
                step = poller.poll_once(self.api.as_ref(), &self.attribution) => step?,
            };

            let records = match step {
                PollStep::Discovered { .. } => continue,
                PollStep::Streamed { records } => records,
            };

            for record in records {
                tokio::select! {
                    biased;
                    _ = shutdown.wait() => return Ok(TailOutcome::Cancelled),
                    sent = sink.send(record) => {
                        if sent.is_err() {
                            info!("Output sink closed, stopping tail of {}", poller.path());
                            return Ok(TailOutcome::SinkClosed);
                        }
                    }
                }
            }

            debug!("Cursor of {} at {}", poller.path(), poller.offset());

            tokio::select! {
                biased;
                _ = shutdown.wait() => return Ok(TailOutcome::Cancelled),
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }
    }
}
