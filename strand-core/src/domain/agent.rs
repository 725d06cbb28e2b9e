//! Agent domain model
//!
//! Represents the cluster node that executes a task and exposes the operator API.

use serde::{Deserialize, Serialize};

/// Port an agent's operator API listens on unless configured otherwise
pub const DEFAULT_AGENT_PORT: u16 = 5051;

/// A cluster agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    /// Unique identifier for the agent
    pub id: String,

    /// Hostname (or IP literal) the agent is reachable on
    pub hostname: String,

    /// Port of the agent's HTTP endpoint
    pub port: u16,
}

impl AgentInfo {
    pub fn new(id: impl Into<String>, hostname: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            hostname: hostname.into(),
            port,
        }
    }

    /// Base URL of the agent's v1 operator API
    ///
    /// IPv6 literals are bracketed, e.g. `http://[::1]:5051/api/v1`.
    pub fn api_url(&self) -> String {
        if self.hostname.contains(':') && !self.hostname.starts_with('[') {
            format!("http://[{}]:{}/api/v1", self.hostname, self.port)
        } else {
            format!("http://{}:{}/api/v1", self.hostname, self.port)
        }
    }
}

impl std::fmt::Display for AgentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.id, self.hostname, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let agent = AgentInfo::new("agent-1", "host", 5051);
        assert_eq!(agent.api_url(), "http://host:5051/api/v1");
    }

    #[test]
    fn test_api_url_brackets_ipv6() {
        let agent = AgentInfo::new("agent-1", "::1", DEFAULT_AGENT_PORT);
        assert_eq!(agent.api_url(), "http://[::1]:5051/api/v1");
    }
}
