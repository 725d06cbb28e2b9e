//! Strand Tail
//!
//! Incrementally tails a file in a task's sandbox on a remote agent.
//!
//! Architecture:
//! - Resolver: locates the file through the agent's operator API (container
//!   lookup plus the agent's `work_dir` flag)
//! - Poller: probes the file size once, then repeatedly reads everything
//!   appended since the last read and republishes each non-blank line
//! - Shutdown: cooperative cancellation threaded through every suspension point
//!
//! One `Listener` tails one file of one task. Running many tails concurrently is
//! left to the caller.

pub mod error;
pub mod listener;
pub mod shutdown;

pub use error::{ErrorKind, TailError};
pub use listener::{Listener, ResolvedLocation, TailOutcome, TailSettings};
pub use shutdown::Shutdown;
