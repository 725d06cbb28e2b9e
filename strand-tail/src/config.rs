//! Tail configuration
//!
//! Identifies the task, its agent and the file to tail, plus the polling knobs.
//! Loaded from environment variables by the binary; the library itself only
//! takes programmatic settings.

use std::time::Duration;

use anyhow::Context;
use strand_core::domain::agent::{AgentInfo, DEFAULT_AGENT_PORT};
use strand_core::domain::task::Task;
use strand_tail::TailSettings;
use strand_tail::listener::{DEFAULT_POLL_INTERVAL, DEFAULT_TAIL_WINDOW};

/// Tail configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// ID of the agent running the task
    pub agent_id: String,

    /// Hostname of the agent's operator API
    pub agent_hostname: String,

    /// Port of the agent's operator API
    pub agent_port: u16,

    pub task_id: String,

    /// ID of the framework that owns the task
    pub framework_id: String,

    /// Host of the task's published endpoint
    pub endpoint_host: String,

    /// Port of the task's published endpoint, shown in every output line
    pub endpoint_port: u16,

    /// File in the task's sandbox to tail
    pub file_name: String,

    /// Pause between two reads
    pub poll_interval: Duration,

    /// Bytes of existing content to replay at most
    pub tail_window: u64,

    /// Capacity of the channel between the tailer and stdout
    pub sink_capacity: usize,
}

impl Config {
    /// Creates a configuration with defaults for everything but the identifiers
    pub fn new(
        agent_id: String,
        agent_hostname: String,
        task_id: String,
        framework_id: String,
        endpoint_port: u16,
    ) -> Self {
        Self {
            agent_id,
            endpoint_host: agent_hostname.clone(),
            agent_hostname,
            agent_port: DEFAULT_AGENT_PORT,
            task_id,
            framework_id,
            endpoint_port,
            file_name: "stdout".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            tail_window: DEFAULT_TAIL_WINDOW,
            sink_capacity: 1024,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - AGENT_ID, AGENT_HOSTNAME (required)
    /// - AGENT_PORT (optional, default: 5051)
    /// - TASK_ID, FRAMEWORK_ID, ENDPOINT_PORT (required)
    /// - ENDPOINT_HOST (optional, default: AGENT_HOSTNAME)
    /// - TAIL_FILE (optional, default: stdout)
    /// - POLL_INTERVAL_MS (optional, milliseconds, default: 1000)
    /// - TAIL_WINDOW_BYTES (optional, default: 2000)
    /// - SINK_CAPACITY (optional, default: 1024)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("{} environment variable not set", key))
        };

        let endpoint_port = required("ENDPOINT_PORT")?
            .parse::<u16>()
            .context("ENDPOINT_PORT must be a port number")?;

        let mut config = Self::new(
            required("AGENT_ID")?,
            required("AGENT_HOSTNAME")?,
            required("TASK_ID")?,
            required("FRAMEWORK_ID")?,
            endpoint_port,
        );

        if let Some(port) = lookup("AGENT_PORT") {
            config.agent_port = port.parse().context("AGENT_PORT must be a port number")?;
        }

        if let Some(host) = lookup("ENDPOINT_HOST") {
            config.endpoint_host = host;
        }

        if let Some(file_name) = lookup("TAIL_FILE") {
            config.file_name = file_name;
        }

        config.poll_interval = lookup("POLL_INTERVAL_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        config.tail_window = lookup("TAIL_WINDOW_BYTES")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TAIL_WINDOW);

        config.sink_capacity = lookup("SINK_CAPACITY")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1024);

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.agent_id.is_empty() {
            anyhow::bail!("agent_id cannot be empty");
        }

        if self.agent_hostname.is_empty() {
            anyhow::bail!("agent_hostname cannot be empty");
        }

        if self.task_id.is_empty() || self.framework_id.is_empty() {
            anyhow::bail!("task_id and framework_id cannot be empty");
        }

        if self.file_name.is_empty() || self.file_name.starts_with('/') {
            anyhow::bail!("file_name must be a relative sandbox path");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.sink_capacity == 0 {
            anyhow::bail!("sink_capacity must be greater than 0");
        }

        Ok(())
    }

    /// The task described by this configuration, assigned to the configured agent
    pub fn task(&self) -> Task {
        Task::new(&self.task_id, &self.framework_id, &self.agent_id)
            .with_endpoint(&self.endpoint_host, self.endpoint_port)
    }

    pub fn agent(&self) -> AgentInfo {
        AgentInfo::new(&self.agent_id, &self.agent_hostname, self.agent_port)
    }

    pub fn settings(&self) -> TailSettings {
        TailSettings {
            poll_interval: self.poll_interval,
            tail_window: self.tail_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("AGENT_ID", "agent-1"),
        ("AGENT_HOSTNAME", "host"),
        ("TASK_ID", "task-1"),
        ("FRAMEWORK_ID", "fw-1"),
        ("ENDPOINT_PORT", "31000"),
    ];

    #[test]
    fn test_defaults_from_required_variables() {
        let config = Config::from_lookup(env(REQUIRED)).unwrap();

        assert_eq!(config.agent_port, 5051);
        assert_eq!(config.endpoint_host, "host");
        assert_eq!(config.file_name, "stdout");
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.tail_window, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("AGENT_PORT", "5052"),
            ("TAIL_FILE", "stderr"),
            ("POLL_INTERVAL_MS", "250"),
            ("TAIL_WINDOW_BYTES", "0"),
        ]);

        let config = Config::from_lookup(env(&pairs)).unwrap();

        assert_eq!(config.agent().api_url(), "http://host:5052/api/v1");
        assert_eq!(config.file_name, "stderr");
        assert_eq!(config.settings().poll_interval, Duration::from_millis(250));
        assert_eq!(config.settings().tail_window, 0);
    }

    #[test]
    fn test_missing_required_variable() {
        let err = Config::from_lookup(env(&REQUIRED[1..])).unwrap_err();
        assert!(err.to_string().contains("AGENT_ID"));
    }

    #[test]
    fn test_invalid_endpoint_port() {
        let mut pairs = REQUIRED.to_vec();
        pairs[4] = ("ENDPOINT_PORT", "http");
        assert!(Config::from_lookup(env(&pairs)).is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::from_lookup(env(REQUIRED)).unwrap();
        assert!(config.validate().is_ok());

        config.file_name = "/etc/passwd".to_string();
        assert!(config.validate().is_err());

        config.file_name = "stdout".to_string();
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_task_is_assigned_to_agent() {
        let config = Config::from_lookup(env(REQUIRED)).unwrap();
        let task = config.task();

        assert_eq!(task.agent_id, config.agent().id);
        assert_eq!(task.attribution_endpoint().map(|e| e.port), Some(31000));
    }
}
