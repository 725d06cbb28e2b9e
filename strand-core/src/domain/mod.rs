//! Core domain types
//!
//! The entities a tailer is bound to. Both are supplied by the caller and stay
//! immutable for the lifetime of a tailer instance.

pub mod agent;
pub mod task;
