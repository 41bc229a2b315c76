use swing_core::Snapshot;

/// What an observer may ask the fixed-step solver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Return the history recorded so far, marked as stopped by the observer.
    StopEarly,
}

/// A snapshot accepted by the solver, reported once per step.
///
/// The initial snapshot is reported as step 0, before any integration.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,
    pub snapshot: Snapshot<I, O>,
}

impl<I, O> Event<I, O> {
    /// Model input at this step.
    pub fn input(&self) -> &I {
        &self.snapshot.input
    }

    /// Model output at this step.
    pub fn output(&self) -> &O {
        &self.snapshot.output
    }

    pub fn is_initial(&self) -> bool {
        self.step == 0
    }
}
