use std::convert::Infallible;

use swing_core::{DerivativeOf, Model, OdeProblem};
use thiserror::Error;

use crate::{PendulumParameters, PendulumState, StateDerivative};

/// Evaluates the pendulum's equation of motion.
///
/// Maps a [`PendulumState`] to its [`StateDerivative`] for a fixed set of
/// [`PendulumParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumModel {
    parameters: PendulumParameters,
}

/// Errors raised while evaluating the pendulum model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ModelError {
    #[error("state diverged: angle {angle} rad, angular velocity {angular_velocity} rad/s")]
    NonFiniteState { angle: f64, angular_velocity: f64 },
}

impl PendulumModel {
    /// Creates a model for the given parameters.
    #[must_use]
    pub fn new(parameters: PendulumParameters) -> Self {
        Self { parameters }
    }

    /// Returns the parameters this model evaluates.
    #[must_use]
    pub fn parameters(&self) -> &PendulumParameters {
        &self.parameters
    }
}

impl Model for PendulumModel {
    type Input = PendulumState;
    type Output = StateDerivative;
    type Error = ModelError;

    fn call(&self, input: &PendulumState) -> Result<StateDerivative, ModelError> {
        if !input.is_finite() {
            return Err(ModelError::NonFiniteState {
                angle: input.angle(),
                angular_velocity: input.angular_velocity(),
            });
        }

        Ok(StateDerivative {
            angular_velocity: input.angular_velocity(),
            angular_acceleration: self.parameters.angular_acceleration(input),
        })
    }
}

/// Adapts [`PendulumModel`] to the fixed-step solvers.
///
/// The pendulum is autonomous, so the model input is the state itself and the
/// time step is a plain `f64` in seconds. Sample times are assigned by the
/// runner from the step index.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendulumProblem;

impl OdeProblem for PendulumProblem {
    type Input = PendulumState;
    type Output = StateDerivative;
    type Delta = f64;
    type State = PendulumState;
    type Error = Infallible;

    fn state(&self, input: &PendulumState) -> Result<PendulumState, Infallible> {
        Ok(*input)
    }

    fn derivative(
        &self,
        _input: &PendulumState,
        output: &StateDerivative,
    ) -> Result<DerivativeOf<PendulumState, f64>, Infallible> {
        Ok(*output)
    }

    fn build_input(
        &self,
        _base: &PendulumState,
        state: &PendulumState,
        _delta: &f64,
    ) -> Result<PendulumState, Infallible> {
        Ok(*state)
    }
}
