//! Agent API responses

use serde::Deserialize;

use crate::dto::value::{IdValue, base64_bytes, lenient_u64};

/// A response from the agent's v1 operator API
///
/// Only the payload matching `kind` is expected to be present.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub get_containers: Option<GetContainers>,

    #[serde(default)]
    pub get_flags: Option<GetFlags>,

    #[serde(default)]
    pub read_file: Option<ReadFile>,
}

/// Payload of a `GET_CONTAINERS` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetContainers {
    #[serde(default)]
    pub containers: Vec<ContainerStatus>,
}

/// A container running on the agent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerStatus {
    #[serde(default)]
    pub framework_id: Option<IdValue>,

    /// Executor the container was launched for; for command tasks this equals the task ID
    #[serde(default)]
    pub executor_id: Option<IdValue>,

    #[serde(default)]
    pub executor_name: Option<String>,

    pub container_id: IdValue,
}

impl ContainerStatus {
    /// The executor ID, or an empty string when the agent did not report one
    pub fn executor_id(&self) -> &str {
        self.executor_id.as_ref().map(|id| id.value.as_str()).unwrap_or("")
    }
}

/// Payload of a `GET_FLAGS` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetFlags {
    #[serde(default)]
    pub flags: Vec<Flag>,
}

/// A single agent configuration flag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flag {
    pub name: String,

    #[serde(default)]
    pub value: Option<String>,
}

/// Payload of a `READ_FILE` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReadFile {
    /// Current total size of the file on the agent
    #[serde(deserialize_with = "lenient_u64")]
    pub size: u64,

    /// Bytes read starting at the requested offset
    #[serde(default, deserialize_with = "base64_bytes")]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_containers_response() {
        let body = r#"{
            "type": "GET_CONTAINERS",
            "get_containers": {
                "containers": [
                    {
                        "framework_id": { "value": "fw-1" },
                        "executor_id": { "value": "task-1" },
                        "executor_name": "Command Executor",
                        "container_id": { "value": "c-1" }
                    }
                ]
            }
        }"#;

        let response: Response = serde_json::from_str(body).unwrap();
        assert_eq!(response.kind, "GET_CONTAINERS");

        let containers = response.get_containers.unwrap().containers;
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].executor_id(), "task-1");
        assert_eq!(containers[0].container_id.value, "c-1");
    }

    #[test]
    fn test_get_flags_response_with_valueless_flag() {
        let body = r#"{
            "type": "GET_FLAGS",
            "get_flags": {
                "flags": [
                    { "name": "hostname_lookup" },
                    { "name": "work_dir", "value": "/var/lib/mesos" }
                ]
            }
        }"#;

        let flags = serde_json::from_str::<Response>(body)
            .unwrap()
            .get_flags
            .unwrap()
            .flags;
        assert_eq!(flags[0].value, None);
        assert_eq!(flags[1].value.as_deref(), Some("/var/lib/mesos"));
    }

    #[test]
    fn test_read_file_decodes_base64_data() {
        // "line-a\n" in base64
        let body = r#"{"type":"READ_FILE","read_file":{"size":20,"data":"bGluZS1hCg=="}}"#;

        let read = serde_json::from_str::<Response>(body)
            .unwrap()
            .read_file
            .unwrap();
        assert_eq!(read.size, 20);
        assert_eq!(read.data, b"line-a\n");
    }

    #[test]
    fn test_read_file_accepts_string_size_and_missing_data() {
        let body = r#"{"type":"READ_FILE","read_file":{"size":"5000"}}"#;

        let read = serde_json::from_str::<Response>(body)
            .unwrap()
            .read_file
            .unwrap();
        assert_eq!(read.size, 5000);
        assert!(read.data.is_empty());
    }

    #[test]
    fn test_read_file_rejects_invalid_base64() {
        let body = r#"{"type":"READ_FILE","read_file":{"size":1,"data":"***"}}"#;
        assert!(serde_json::from_str::<Response>(body).is_err());
    }

    #[test]
    fn test_read_file_rejects_negative_size() {
        let body = r#"{"type":"READ_FILE","read_file":{"size":-1}}"#;
        assert!(serde_json::from_str::<Response>(body).is_err());
    }
}
