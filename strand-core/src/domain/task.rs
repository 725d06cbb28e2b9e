//! Task domain types

use serde::{Deserialize, Serialize};

/// A scheduled unit of cluster work
///
/// Identified by its task ID, the framework that owns it and the agent it was
/// assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,

    /// ID of the owning framework (the job the task belongs to)
    pub framework_id: String,

    /// ID of the agent the task was assigned to
    pub agent_id: String,

    /// Published network endpoints, used only for attributing output
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// A published host/port pair of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Task {
    /// Creates a task without published endpoints
    pub fn new(
        task_id: impl Into<String>,
        framework_id: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            framework_id: framework_id.into(),
            agent_id: agent_id.into(),
            endpoints: Vec::new(),
        }
    }

    /// Adds a published endpoint
    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.endpoints.push(Endpoint {
            host: host.into(),
            port,
        });
        self
    }

    /// The endpoint output lines are attributed to
    ///
    /// Always the first published endpoint; `None` when the task publishes none.
    pub fn attribution_endpoint(&self) -> Option<&Endpoint> {
        self.endpoints.first()
    }
}
