//! Tail cursor

use tracing::warn;

/// Byte offset into the tailed file up to which content has been consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TailCursor {
    offset: u64,
}

impl TailCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Positions the cursor so that at most `window` bytes of existing content are replayed
    pub fn discover(&mut self, size: u64, window: u64) {
        self.offset = size.saturating_sub(window);
    }

    /// Moves the cursor to the file size the agent reported with the last read
    ///
    /// Truncation and rotation are not handled; if the file shrank below the
    /// previous position the cursor simply follows the new size.
    pub fn advance(&mut self, size: u64) {
        if size < self.offset {
            warn!(
                "File shrank from {} to {} bytes; truncation is not handled",
                self.offset, size
            );
        }
        self.offset = size;
    }
}
