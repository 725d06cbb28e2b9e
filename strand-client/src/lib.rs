//! Strand HTTP Client
//!
//! A small, type-safe client for an agent's v1 operator API.
//!
//! The operator API is a single `POST /api/v1` endpoint that takes a JSON call
//! tagged by `type`. This crate wraps the three calls the tailer needs:
//! listing containers, reading configuration flags and reading byte ranges of
//! sandbox files.
//!
//! # Example
//!
//! ```no_run
//! use strand_client::AgentClient;
//!
//! #[tokio::main]
//! async fn main() -> strand_client::Result<()> {
//!     let client = AgentClient::new("http://localhost:5051/api/v1");
//!
//!     for container in client.get_containers().await? {
//!         println!("{} -> {}", container.executor_id(), container.container_id.value);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod containers;
pub mod error;
mod files;
mod flags;

// Re-export commonly used types
pub use api::AgentApi;
pub use error::{ClientError, Result};
pub use strand_core::dto::{ContainerStatus, Flag, ReadFile};

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use strand_core::domain::agent::AgentInfo;
use strand_core::dto::{Call, Response};
use tracing::debug;

/// HTTP client for one agent's operator API
///
/// Each tailer owns its own client; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Operator API endpoint (e.g., "http://agent-1:5051/api/v1")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl AgentClient {
    /// Create a new agent client
    ///
    /// # Arguments
    /// * `base_url` - The operator API endpoint (e.g., "http://localhost:5051/api/v1")
    ///
    /// # Example
    /// ```
    /// use strand_client::AgentClient;
    ///
    /// let client = AgentClient::new("http://localhost:5051/api/v1");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new agent client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use strand_client::AgentClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = AgentClient::with_client("http://localhost:5051/api/v1", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client addressing the operator API of `agent`
    pub fn for_agent(agent: &AgentInfo, client: Client) -> Self {
        Self::with_client(agent.api_url(), client)
    }

    /// Get the operator API endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Call Dispatch
    // =============================================================================

    /// Send a call and decode the response
    ///
    /// Fails with `UnexpectedResponse` if the agent answers with a different
    /// response type than the call asked for.
    async fn call(&self, call: &Call) -> Result<Response> {
        debug!("Sending {} call to {}", call.response_type(), self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .header(ACCEPT, "application/json")
            .json(call)
            .send()
            .await?;

        let decoded: Response = self.handle_response(response).await?;

        if decoded.kind != call.response_type() {
            return Err(ClientError::UnexpectedResponse(format!(
                "expected {} response, got {}",
                call.response_type(),
                decoded.kind
            )));
        }

        Ok(decoded)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
