//! Strand Core
//!
//! Core types shared by the Strand agent client and tailer.
//!
//! This crate contains:
//! - Domain types: the task being tailed and the agent that runs it
//! - DTOs: the JSON shapes of the agent's v1 operator API (calls and responses)

pub mod domain;
pub mod dto;
