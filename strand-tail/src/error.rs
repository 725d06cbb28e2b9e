//! Error types for the tailer

use strand_client::ClientError;
use thiserror::Error;

/// Errors that stop a tailer
///
/// None of these are retried internally; the caller decides whether to build a
/// new `Listener` and start over.
#[derive(Debug, Error)]
pub enum TailError {
    /// The task was assigned to a different agent than the one supplied
    #[error("Task {task_id} is assigned to agent {task_agent}, not {agent}")]
    AgentMismatch {
        task_id: String,
        task_agent: String,
        agent: String,
    },

    /// The task has no endpoint to attribute output lines to
    #[error("Task {task_id} publishes no endpoint to attribute output to")]
    NoPublishedEndpoint { task_id: String },

    /// No container on the agent runs the task's executor
    #[error("Container not found for task {task_id}")]
    ContainerNotFound { task_id: String },

    /// The agent does not report its work directory
    #[error("Agent {agent_id} does not report a work_dir flag")]
    WorkDirNotFound { agent_id: String },

    /// An agent API call could not be sent or its response decoded
    #[error("Agent API call failed: {0}")]
    Transport(#[from] ClientError),
}

/// Coarse classification of a `TailError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied task/agent data is inconsistent or incomplete
    Configuration,
    /// The agent answered but the file could not be located
    Resolution,
    /// The agent could not be reached or answered with garbage
    Transport,
}

impl TailError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TailError::AgentMismatch { .. } | TailError::NoPublishedEndpoint { .. } => {
                ErrorKind::Configuration
            }
            TailError::ContainerNotFound { .. } | TailError::WorkDirNotFound { .. } => {
                ErrorKind::Resolution
            }
            TailError::Transport(_) => ErrorKind::Transport,
        }
    }
}
