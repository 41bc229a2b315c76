//! Fixed-step explicit solver for ODE problems.
//!
//! Every step advances the state by the same increment `dt` using one of the
//! explicit [`Scheme`]s. For the classic Runge–Kutta scheme the update is:
//!
//! ```text
//! k1 = f(y_n)
//! k2 = f(y_n + k1 * dt/2)
//! k3 = f(y_n + k2 * dt/2)
//! k4 = f(y_n + k3 * dt)
//! y_{n+1} = y_n + (k1 + 2 k2 + 2 k3 + k4) / 6 * dt
//! ```
//!
//! # Example
//!
//! ```ignore
//! use swing_solvers::transient::fixed_step::{self, Scheme};
//!
//! let solution =
//!     fixed_step::solve_unobserved(&model, &problem, initial_input, dt, steps, Scheme::Rk4)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod error;
mod event;
mod scheme;
mod solution;

pub use error::Error;
pub use event::{Action, Event};
pub use scheme::{Blend, Scheme};
pub use solution::{Solution, Status};

use std::ops::Mul;

use swing_core::{DerivativeOf, Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Advances a snapshot by exactly one step.
///
/// This is a pure function of its arguments: the model and problem are only
/// read, and the returned snapshot holds the finalized next input together
/// with the model output evaluated at it.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any stage.
pub fn advance<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: &P::Delta,
    scheme: Scheme,
) -> Result<Snapshot<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Blend,
{
    let state = problem.state(&current.input).map_err(Error::problem)?;
    let k1 = problem
        .derivative(&current.input, &current.output)
        .map_err(Error::problem)?;

    let slope = scheme::combined_derivative(model, problem, &current.input, k1, dt, scheme)?;
    let next_state = state.step(slope, dt.clone());

    let next_input = problem
        .build_input(&current.input, &next_state, dt)
        .map_err(Error::problem)?;
    let next_input = problem
        .finalize_step(next_input, &current.input, &current.output, dt)
        .map_err(Error::problem)?;

    Snapshot::from_call(model, next_input).map_err(Error::model)
}

/// Integrates an ODE problem for a fixed number of equal steps.
///
/// # Algorithm
///
/// 1. Call the model with the initial input to get the initial snapshot.
/// 2. For each step:
///    - [`advance`] the current snapshot by `dt` with the chosen scheme.
///    - Record the new snapshot in the history.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full history (`steps + 1` snapshots).
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    scheme: Scheme,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Blend,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let initial_snapshot = Snapshot::from_call(model, initial).map_err(Error::model)?;

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial_snapshot.clone());

    let event = Event {
        step: 0,
        snapshot: initial_snapshot,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            scheme,
            history,
            steps: 0,
        });
    }

    for step in 1..=steps {
        let current = &history[history.len() - 1];
        let next = advance(model, problem, current, &dt, scheme)?;

        history.push(next.clone());

        let event = Event {
            step,
            snapshot: next,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                scheme,
                history,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        scheme,
        history,
        steps,
    })
}

/// Integrates an ODE problem without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    scheme: Scheme,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Blend,
{
    solve(model, problem, initial, dt, steps, scheme, ())
}
