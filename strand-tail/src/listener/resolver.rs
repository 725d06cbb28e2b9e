//! File location resolution
//!
//! The tailed file lives at
//! `{work_dir}/slaves/{agent}/frameworks/{framework}/executors/{task}/runs/{container}/{file}`
//! on the agent. The container ID and work directory are not known up front and
//! are looked up through the operator API.

use strand_client::AgentApi;
use strand_core::domain::agent::AgentInfo;
use strand_core::domain::task::Task;
use strand_core::dto::{ContainerStatus, Flag};
use tracing::{debug, info};

use crate::error::TailError;

/// Name of the agent flag holding its work directory
pub const WORK_DIR_FLAG: &str = "work_dir";

/// Where the tailed file lives on the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub container_id: String,
    pub work_dir: String,
    /// Absolute path of the file on the agent
    pub path: String,
}

/// Composes the sandbox path of a task's file
pub fn compose_path(
    work_dir: &str,
    agent_id: &str,
    framework_id: &str,
    task_id: &str,
    container_id: &str,
    file_name: &str,
) -> String {
    format!(
        "{}/slaves/{}/frameworks/{}/executors/{}/runs/{}/{}",
        work_dir, agent_id, framework_id, task_id, container_id, file_name
    )
}

/// Finds the container whose executor ID equals the task ID
///
/// Command tasks run under an executor named after the task, so the first
/// container with that executor is the task's container.
pub fn find_container_id<'a>(containers: &'a [ContainerStatus], task_id: &str) -> Option<&'a str> {
    containers
        .iter()
        .find(|c| c.executor_id() == task_id)
        .map(|c| c.container_id.value.as_str())
        .filter(|id| !id.is_empty())
}

/// Finds the value of the `work_dir` flag; the last occurrence wins
pub fn find_work_dir(flags: &[Flag]) -> Option<&str> {
    flags
        .iter()
        .filter(|f| f.name == WORK_DIR_FLAG)
        .filter_map(|f| f.value.as_deref())
        .last()
        .filter(|dir| !dir.is_empty())
}

/// Resolves the location of `file_name` in the sandbox of `task`
///
/// Issues two calls: the container listing, then the flag listing. A missing
/// container or work directory is fatal; nothing is retried.
pub async fn resolve(
    api: &dyn AgentApi,
    task: &Task,
    agent: &AgentInfo,
    file_name: &str,
) -> Result<ResolvedLocation, TailError> {
    let containers = api.get_containers().await?;
    debug!(
        "Agent {} reports {} container(s)",
        agent.id,
        containers.len()
    );

    let container_id = find_container_id(&containers, &task.task_id)
        .ok_or_else(|| TailError::ContainerNotFound {
            task_id: task.task_id.clone(),
        })?
        .to_string();

    let flags = api.get_flags().await?;
    let work_dir = find_work_dir(&flags)
        .ok_or_else(|| TailError::WorkDirNotFound {
            agent_id: agent.id.clone(),
        })?
        .to_string();

    let path = compose_path(
        &work_dir,
        &task.agent_id,
        &task.framework_id,
        &task.task_id,
        &container_id,
        file_name,
    );

    info!(
        "Resolved {} of task {} to {} (container {})",
        file_name, task.task_id, path, container_id
    );

    Ok(ResolvedLocation {
        container_id,
        work_dir,
        path,
    })
}
