//! Agent API calls

use serde::{Deserialize, Serialize};

/// A call to the agent's v1 operator API
///
/// Serialized with the call type as the `type` tag, e.g. `{"type":"GET_FLAGS"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Call {
    /// Lists the containers running on the agent
    GetContainers,

    /// Returns the agent's configuration flags
    GetFlags,

    /// Reads a byte range of a file in the agent's sandbox
    ReadFile { read_file: ReadFileCall },
}

/// Payload of a `READ_FILE` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileCall {
    pub path: String,

    pub offset: u64,

    /// Maximum number of bytes to return; omitted means "to the end of the file"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

impl Call {
    /// Builds a `READ_FILE` call
    pub fn read_file(path: impl Into<String>, offset: u64, length: Option<u64>) -> Self {
        Call::ReadFile {
            read_file: ReadFileCall {
                path: path.into(),
                offset,
                length,
            },
        }
    }

    /// The `type` tag of the response that answers this call
    pub fn response_type(&self) -> &'static str {
        match self {
            Call::GetContainers => "GET_CONTAINERS",
            Call::GetFlags => "GET_FLAGS",
            Call::ReadFile { .. } => "READ_FILE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_calls_serialize_as_bare_type() {
        assert_eq!(
            serde_json::to_value(Call::GetContainers).unwrap(),
            json!({ "type": "GET_CONTAINERS" })
        );
        assert_eq!(
            serde_json::to_value(Call::GetFlags).unwrap(),
            json!({ "type": "GET_FLAGS" })
        );
    }

    #[test]
    fn test_size_probe_carries_zero_length() {
        let call = Call::read_file("/var/lib/mesos/stdout", 0, Some(0));
        assert_eq!(
            serde_json::to_value(call).unwrap(),
            json!({
                "type": "READ_FILE",
                "read_file": { "path": "/var/lib/mesos/stdout", "offset": 0, "length": 0 }
            })
        );
    }

    #[test]
    fn test_read_to_end_omits_length() {
        let call = Call::read_file("/tmp/stdout", 3000, None);
        assert_eq!(
            serde_json::to_value(call).unwrap(),
            json!({
                "type": "READ_FILE",
                "read_file": { "path": "/tmp/stdout", "offset": 3000 }
            })
        );
    }
}
