//! Integrates a single release angle into a [`Trajectory`].

use swing_core::Observer;
use swing_solvers::transient::fixed_step::{self, Action, Event, Scheme};
use tracing::debug;
use uom::si::{f64::Time, time::second};

use crate::{
    PendulumModel, PendulumParameters, PendulumProblem, PendulumState, Sample, StateDerivative,
    Trajectory,
    error::{Error, require_positive},
};

/// Upper bound on the number of steps in a single run.
const MAX_STEPS: f64 = 1.0e9;

/// Duration and step size shared by every run of a sweep.
///
/// The number of steps is `round(duration / time_step)`, so the final sample
/// lands on the step boundary nearest to `duration`. Every trajectory built
/// with this config holds `steps() + 1` samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    duration: f64,
    time_step: f64,
    scheme: Scheme,
}

impl SimulationConfig {
    /// Creates a config from unit-safe durations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either duration is not positive,
    /// or if the duration rounds to zero steps.
    pub fn new(duration: Time, time_step: Time, scheme: Scheme) -> Result<Self, Error> {
        Self::from_si(duration.get::<second>(), time_step.get::<second>(), scheme)
    }

    /// Creates a config from durations in seconds.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::new`].
    pub fn from_si(duration: f64, time_step: f64, scheme: Scheme) -> Result<Self, Error> {
        let duration = require_positive("duration", duration)?;
        let time_step = require_positive("time_step", time_step)?;

        let steps = (duration / time_step).round();
        if steps < 1.0 {
            return Err(Error::invalid(
                "duration",
                duration,
                "must span at least one time step",
            ));
        }
        if steps > MAX_STEPS {
            return Err(Error::invalid(
                "time_step",
                time_step,
                "too small for the requested duration",
            ));
        }

        Ok(Self {
            duration,
            time_step,
            scheme,
        })
    }

    /// Requested duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Fixed time step in seconds.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Number of integration steps per run.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> usize {
        // Bounded to [1, MAX_STEPS] on construction.
        (self.duration / self.time_step).round() as usize
    }
}

impl Default for SimulationConfig {
    /// Three seconds at half-millisecond steps with classic Runge–Kutta.
    fn default() -> Self {
        Self {
            duration: 3.0,
            time_step: 0.0005,
            scheme: Scheme::Rk4,
        }
    }
}

/// Simulates a pendulum released from rest at `initial_angle_degrees`.
///
/// # Errors
///
/// Returns [`Error::Solver`] if the state becomes non-finite during the run.
pub fn simulate(
    parameters: &PendulumParameters,
    initial_angle_degrees: i32,
    config: &SimulationConfig,
) -> Result<Trajectory, Error> {
    let model = PendulumModel::new(*parameters);
    let initial = PendulumState::released_from(initial_angle_degrees);
    let dt = config.time_step();

    let progress = ProgressLog::new(initial_angle_degrees, config);
    let solution = fixed_step::solve(
        &model,
        &PendulumProblem,
        initial,
        dt,
        config.steps(),
        config.scheme(),
        progress,
    )?;
    debug!(
        angle = initial_angle_degrees,
        steps = solution.steps,
        model_calls = solution.model_calls(),
        "simulated with {}",
        solution.scheme
    );

    #[allow(clippy::cast_precision_loss)]
    let samples = solution
        .inputs()
        .enumerate()
        .map(|(index, state)| Sample {
            time: index as f64 * dt,
            angle: state.angle(),
            angular_velocity: state.angular_velocity(),
        })
        .collect();

    Ok(Trajectory::from_parts(
        initial_angle_degrees,
        *parameters,
        dt,
        config.scheme(),
        samples,
    ))
}

/// Logs once per simulated second.
struct ProgressLog {
    angle: i32,
    steps_per_second: usize,
    total_seconds: usize,
}

impl ProgressLog {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn new(angle: i32, config: &SimulationConfig) -> Self {
        let steps_per_second = (1.0 / config.time_step()).round().max(1.0) as usize;
        let total_seconds = config.duration().ceil().max(1.0) as usize;
        Self {
            angle,
            steps_per_second,
            total_seconds,
        }
    }
}

impl Observer<Event<PendulumState, StateDerivative>, Action> for ProgressLog {
    fn observe(&mut self, event: &Event<PendulumState, StateDerivative>) -> Option<Action> {
        if !event.is_initial() && event.step % self.steps_per_second == 0 {
            debug!(
                angle = self.angle,
                "{}/{} s simulated",
                event.step / self.steps_per_second,
                self.total_seconds
            );
        }
        None
    }
}
