use crate::{DerivativeOf, StepIntegrable};

/// Adapts a [`Model`](crate::Model) to a generic time integrator.
///
/// The integrator never looks inside model inputs. It asks the problem for the
/// integrable [`state`](OdeProblem::state) and its
/// [`derivative`](OdeProblem::derivative), steps the state itself, and hands
/// the stepped state back through [`build_input`](OdeProblem::build_input) to
/// get the next model input.
///
/// Multi-stage schemes call `build_input` for trial states inside a step that
/// are never accepted, so it must not have side effects.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the integrable state out of a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input does not carry a usable state.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Reads the state derivative from a model evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the output does not determine a derivative.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds the model input for `state`, reached by stepping `delta` from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no valid input exists for `state`.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;

    /// Adjusts an accepted step before it is recorded.
    ///
    /// Only called once per full step, never for intermediate stages. The
    /// default keeps the input as built.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the accepted input cannot be adjusted.
    fn finalize_step(
        &self,
        next_input: Self::Input,
        _prev_input: &Self::Input,
        _prev_output: &Self::Output,
        _step_delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(next_input)
    }
}
