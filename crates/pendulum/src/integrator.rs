//! Single-step advancement of a pendulum state.
//!
//! [`advance`] is a pure function of its arguments. It keeps no state between
//! calls, so callers carry the returned state forward themselves.

use swing_core::Snapshot;
use swing_solvers::transient::fixed_step::{self, Scheme};

use crate::{
    PendulumModel, PendulumParameters, PendulumProblem, PendulumState,
    error::{Error, require_positive},
};

/// Advances `state` by one time step `dt` (seconds) using `scheme`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `dt` is not finite and positive, or
/// [`Error::Solver`] if the state is (or becomes) non-finite.
pub fn advance(
    state: PendulumState,
    parameters: &PendulumParameters,
    dt: f64,
    scheme: Scheme,
) -> Result<PendulumState, Error> {
    let dt = require_positive("time_step", dt)?;
    let model = PendulumModel::new(*parameters);

    let current = Snapshot::from_call(&model, state).map_err(fixed_step::Error::model)?;

    let next = fixed_step::advance(&model, &PendulumProblem, &current, &dt, scheme)?;
    Ok(next.input)
}
