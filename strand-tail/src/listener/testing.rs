//! Scripted agent used by the listener tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use strand_client::{AgentApi, ClientError, ContainerStatus, Flag, ReadFile, Result};
use strand_core::dto::IdValue;

/// Builds a container entry for `executor_id`
pub fn container(executor_id: &str, container_id: &str) -> ContainerStatus {
    ContainerStatus {
        framework_id: Some(IdValue::new("fw-1")),
        executor_id: Some(IdValue::new(executor_id)),
        executor_name: None,
        container_id: IdValue::new(container_id),
    }
}

pub fn flag(name: &str, value: &str) -> Flag {
    Flag {
        name: name.to_string(),
        value: Some(value.to_string()),
    }
}

/// Builds a read response reporting `size` and carrying `data`
pub fn chunk(size: u64, data: &str) -> ReadFile {
    ReadFile {
        size,
        data: data.as_bytes().to_vec(),
    }
}

/// An agent that answers from a script
///
/// Reads are served in order. Once the script is exhausted, reads fail with the
/// configured error if any, otherwise they report the last size with no data,
/// or never answer when the fake was made to hang.
#[derive(Default)]
pub struct FakeAgent {
    containers: Vec<ContainerStatus>,
    containers_error: Mutex<Option<ClientError>>,
    flags: Vec<Flag>,
    flags_calls: AtomicUsize,
    flags_error: Mutex<Option<ClientError>>,
    reads: Mutex<VecDeque<ReadFile>>,
    reads_error: Mutex<Option<ClientError>>,
    hang_reads: bool,
    last_size: Mutex<u64>,
    issued: Arc<Mutex<Vec<(u64, Option<u64>)>>>,
}

impl FakeAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(mut self, containers: Vec<ContainerStatus>) -> Self {
        self.containers = containers;
        self
    }

    pub fn failing_containers(self, error: ClientError) -> Self {
        *self.containers_error.lock().unwrap() = Some(error);
        self
    }

    /// Reads past the end of the script never complete
    pub fn hanging_reads(mut self) -> Self {
        self.hang_reads = true;
        self
    }

    pub fn flags_calls(&self) -> usize {
        self.flags_calls.load(Ordering::SeqCst)
    }

    pub fn with_flags(mut self, flags: Vec<Flag>) -> Self {
        self.flags = flags;
        self
    }

    pub fn failing_flags(self, error: ClientError) -> Self {
        *self.flags_error.lock().unwrap() = Some(error);
        self
    }

    pub fn with_reads(self, reads: Vec<ReadFile>) -> Self {
        self.reads.lock().unwrap().extend(reads);
        self
    }

    pub fn failing_reads(self, error: ClientError) -> Self {
        *self.reads_error.lock().unwrap() = Some(error);
        self
    }

    /// `(offset, length)` of every read issued so far
    pub fn reads_issued(&self) -> Vec<(u64, Option<u64>)> {
        self.issued.lock().unwrap().clone()
    }

    /// Shared view of the issued reads, usable after the fake has been moved
    pub fn issued_handle(&self) -> Arc<Mutex<Vec<(u64, Option<u64>)>>> {
        Arc::clone(&self.issued)
    }
}

#[async_trait]
impl AgentApi for FakeAgent {
    async fn get_containers(&self) -> Result<Vec<ContainerStatus>> {
        match self.containers_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(self.containers.clone()),
        }
    }

    async fn get_flags(&self) -> Result<Vec<Flag>> {
        self.flags_calls.fetch_add(1, Ordering::SeqCst);
        match self.flags_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(self.flags.clone()),
        }
    }

    async fn read_file(&self, _path: &str, offset: u64, length: Option<u64>) -> Result<ReadFile> {
        self.issued.lock().unwrap().push((offset, length));

        if let Some(next) = self.reads.lock().unwrap().pop_front() {
            *self.last_size.lock().unwrap() = next.size;
            return Ok(next);
        }

        if let Some(error) = self.reads_error.lock().unwrap().take() {
            return Err(error);
        }

        if self.hang_reads {
            std::future::pending::<()>().await;
        }

        Ok(ReadFile {
            size: *self.last_size.lock().unwrap(),
            data: Vec::new(),
        })
    }
}
