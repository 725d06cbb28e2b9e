//! Output records
//!
//! Every non-blank line read from the file becomes one record of the form
//! `[<hostname>:<port>]: <line>`.

/// Formats a single output record
pub fn format_record(hostname: &str, port: u16, line: &str) -> String {
    format!("[{}:{}]: {}", hostname, port, line)
}

/// Where output lines are attributed to: the agent's hostname and the task's endpoint port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub hostname: String,
    pub port: u16,
}

impl Attribution {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }

    /// Splits freshly read bytes into records, in order
    ///
    /// Lines that are empty or whitespace-only are dropped. A trailing partial
    /// line is emitted as-is; nothing is buffered across reads.
    pub fn records(&self, data: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(data)
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| format_record(&self.hostname, self.port, line))
            .collect()
    }
}
