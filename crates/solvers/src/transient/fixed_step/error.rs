use std::error::Error as StdError;

type BoxedError = Box<dyn StdError + Send + Sync>;

/// Failure of a fixed-step run.
///
/// The stepping itself cannot fail. Every error originates in the model or the
/// problem being integrated and is boxed, so callers see one error type for
/// any model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model rejected an input, at a step or at an intermediate stage.
    #[error("model call failed")]
    Model(#[source] BoxedError),

    /// The problem could not convert between model input and integrable state.
    #[error("ode problem failed")]
    Problem(#[source] BoxedError),
}

impl Error {
    /// Boxes a model failure.
    pub fn model(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Model(Box::new(err))
    }

    /// Boxes a problem failure.
    pub fn problem(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Problem(Box::new(err))
    }
}
