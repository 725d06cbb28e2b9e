//! Data Transfer Objects for the agent operator API
//!
//! The agent exposes a single `POST /api/v1` endpoint. Every request is a JSON
//! `Call` tagged by `type`, every answer a JSON `Response` carrying the payload
//! field that matches that type.

pub mod call;
pub mod response;
pub mod value;

pub use call::{Call, ReadFileCall};
pub use response::{ContainerStatus, Flag, GetContainers, GetFlags, ReadFile, Response};
pub use value::IdValue;
