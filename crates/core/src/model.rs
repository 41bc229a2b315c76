/// A deterministic map from a typed input to a typed output.
///
/// Solvers evaluate a model several times per step and sweeps compare files
/// across re-runs, so the same input must always give the same output.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model at `input`.
    ///
    /// # Errors
    ///
    /// Returns the model's own error when `input` is outside its domain.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A model input paired with the output it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Evaluates `model` at `input` and keeps both.
    ///
    /// # Errors
    ///
    /// Returns the model's error unchanged.
    pub fn from_call<M>(model: &M, input: I) -> Result<Self, M::Error>
    where
        M: Model<Input = I, Output = O>,
    {
        let output = model.call(&input)?;
        Ok(Self::new(input, output))
    }
}
