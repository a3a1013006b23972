//! Per-unit progress reporting.

/// Progress through the units of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Units finished so far (1-based once work starts)
    pub completed: usize,
    /// Total units in this stage
    pub total: usize,
}

impl Progress {
    /// Create a progress value.
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Completed fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed.min(self.total) as f32) / (self.total as f32)
    }
}

/// A progress callback that ignores every update.
pub fn no_progress(_: Progress) {}
