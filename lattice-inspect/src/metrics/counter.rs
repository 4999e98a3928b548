//! Render Counter
//!
//! Counts committed renders. The count is read during a render and
//! incremented after the render commits, so a render body that runs twice
//! before one commit still sees a single, stable number.

/// Committed-render counter starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCounter {
    count: u64,
}

impl RenderCounter {
    pub fn new() -> Self {
        Self { count: 1 }
    }

    /// The number of the render in progress (1 for the first render).
    pub fn current(&self) -> u64 {
        self.count
    }

    /// Record a committed render.
    pub fn commit(&mut self) {
        self.count += 1;
    }
}

impl Default for RenderCounter {
    fn default() -> Self {
        Self::new()
    }
}
