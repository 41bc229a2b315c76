use swing_core::Snapshot;

use super::Scheme;

/// How a fixed-step run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Complete,
    StoppedByObserver,
}

/// Recorded history of a fixed-step run.
///
/// `history[k]` is the snapshot after `k` steps, so a complete run of `n`
/// steps holds `n + 1` snapshots.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub scheme: Scheme,
    pub history: Vec<Snapshot<I, O>>,
    /// Steps taken before the run ended.
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == Status::Complete
    }

    /// The snapshot the run ended on.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }

    /// Model evaluations the run performed.
    ///
    /// One for the initial snapshot, then [`Scheme::stages`] per step.
    #[must_use]
    pub fn model_calls(&self) -> usize {
        1 + self.steps * self.scheme.stages()
    }

    /// Model inputs in step order.
    pub fn inputs(&self) -> impl Iterator<Item = &I> {
        self.history.iter().map(|snapshot| &snapshot.input)
    }
}
