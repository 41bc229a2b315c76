use std::{
    fmt,
    ops::{Add, Mul},
};

use swing_core::{DerivativeOf, Model, OdeProblem, StepIntegrable};

use super::Error;

/// Explicit update rules supported by the fixed-step solver.
///
/// All schemes use the same step size for every step. They differ in how many
/// times the model is evaluated per step and in how the resulting derivatives
/// are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Scheme {
    /// First-order explicit Euler: one evaluation per step.
    ///
    /// Local truncation error accumulates as steady energy growth in
    /// oscillatory systems. Useful as a baseline, not for period measurements.
    ForwardEuler,

    /// Explicit trapezoidal rule (Heun's method): two evaluations per step.
    ///
    /// Averages the derivative at the start of the step with the derivative
    /// at a forward Euler predictor. Second order.
    Heun,

    /// Classic fourth-order Runge–Kutta: four evaluations per step.
    #[default]
    Rk4,
}

impl Scheme {
    /// Returns the formal order of accuracy of the scheme.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Self::ForwardEuler => 1,
            Self::Heun => 2,
            Self::Rk4 => 4,
        }
    }

    /// Returns the number of model evaluations needed per step.
    #[must_use]
    pub fn stages(self) -> usize {
        match self {
            Self::ForwardEuler => 1,
            Self::Heun => 2,
            Self::Rk4 => 4,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ForwardEuler => "forward-euler",
            Self::Heun => "heun",
            Self::Rk4 => "rk4",
        };
        f.write_str(name)
    }
}

/// A derivative that multi-stage schemes can combine.
///
/// Heun and RK4 form weighted sums of several stage derivatives before the
/// final step, so the derivative type must support addition and scaling.
pub trait Blend: Clone + Add<Output = Self> + Mul<f64, Output = Self> {}

impl<T> Blend for T where T: Clone + Add<Output = T> + Mul<f64, Output = T> {}

/// Computes the combined derivative that carries `input` across one step.
///
/// `k1` is the derivative already known at the start of the step.
pub(super) fn combined_derivative<M, P>(
    model: &M,
    problem: &P,
    input: &M::Input,
    k1: DerivativeOf<P::State, P::Delta>,
    dt: &P::Delta,
    scheme: Scheme,
) -> Result<DerivativeOf<P::State, P::Delta>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Blend,
{
    match scheme {
        Scheme::ForwardEuler => Ok(k1),

        Scheme::Heun => {
            let state = problem.state(input).map_err(Error::problem)?;
            let k2 = stage(model, problem, input, &state, k1.clone(), dt.clone())?;

            Ok((k1 + k2) * 0.5)
        }

        Scheme::Rk4 => {
            let state = problem.state(input).map_err(Error::problem)?;
            let half = dt.clone() * 0.5;

            let k2 = stage(model, problem, input, &state, k1.clone(), half.clone())?;
            let k3 = stage(model, problem, input, &state, k2.clone(), half)?;
            let k4 = stage(model, problem, input, &state, k3.clone(), dt.clone())?;

            Ok((k1 + (k2 + k3) * 2.0 + k4) * (1.0 / 6.0))
        }
    }
}

/// Evaluates the derivative at `state` stepped by `slope * delta`.
fn stage<M, P>(
    model: &M,
    problem: &P,
    base: &M::Input,
    state: &P::State,
    slope: DerivativeOf<P::State, P::Delta>,
    delta: P::Delta,
) -> Result<DerivativeOf<P::State, P::Delta>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    let trial_state = state.step(slope, delta.clone());
    let trial_input = problem
        .build_input(base, &trial_state, &delta)
        .map_err(Error::problem)?;
    let trial_output = model.call(&trial_input).map_err(Error::model)?;

    problem
        .derivative(&trial_input, &trial_output)
        .map_err(Error::problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serialized_names() {
        assert_eq!(Scheme::ForwardEuler.to_string(), "forward-euler");
        assert_eq!(Scheme::Heun.to_string(), "heun");
        assert_eq!(Scheme::Rk4.to_string(), "rk4");
    }

    #[test]
    fn rk4_is_the_default() {
        assert_eq!(Scheme::default(), Scheme::Rk4);
        assert_eq!(Scheme::default().order(), 4);
    }

    #[test]
    fn explicit_schemes_need_one_stage_per_order() {
        for scheme in [Scheme::ForwardEuler, Scheme::Heun, Scheme::Rk4] {
            assert_eq!(scheme.stages(), scheme.order() as usize);
        }
    }
}
