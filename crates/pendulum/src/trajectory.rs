use serde::{Deserialize, Serialize};
use swing_solvers::transient::fixed_step::Scheme;

use crate::{PendulumParameters, PendulumState};

/// One recorded point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sample {
    /// Seconds since release.
    pub time: f64,

    /// Angle from the downward vertical (rad).
    pub angle: f64,

    /// Angular velocity (rad/s).
    pub angular_velocity: f64,
}

impl Sample {
    /// Returns the state recorded by this sample.
    #[must_use]
    pub fn state(&self) -> PendulumState {
        PendulumState::from_parts(self.angle, self.angular_velocity)
    }
}

/// The complete time series of a single pendulum run.
///
/// Samples are taken at `time = i * time_step` for `i = 0..=steps`, so times
/// are strictly increasing and the first sample is the release state. A
/// trajectory is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    initial_angle_degrees: i32,
    parameters: PendulumParameters,
    time_step: f64,
    scheme: Scheme,
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Assembles a trajectory from already-validated parts.
    pub(crate) fn from_parts(
        initial_angle_degrees: i32,
        parameters: PendulumParameters,
        time_step: f64,
        scheme: Scheme,
        samples: Vec<Sample>,
    ) -> Self {
        Self {
            initial_angle_degrees,
            parameters,
            time_step,
            scheme,
            samples,
        }
    }

    /// The release angle in degrees.
    #[must_use]
    pub fn initial_angle_degrees(&self) -> i32 {
        self.initial_angle_degrees
    }

    /// The physical parameters of the run.
    #[must_use]
    pub fn parameters(&self) -> &PendulumParameters {
        &self.parameters
    }

    /// The fixed time step in seconds.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// The integration scheme used for every step.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// All samples in time order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples, including the release sample.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the last sample in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.samples.last().map_or(0.0, |sample| sample.time)
    }

    /// Largest deviation of specific mechanical energy from its initial value.
    ///
    /// The deviation is relative to the initial energy. A release from rest at
    /// the bottom has no energy to compare against, so the absolute deviation
    /// (J/kg) is returned instead.
    #[must_use]
    pub fn energy_drift(&self) -> f64 {
        let Some(first) = self.samples.first() else {
            return 0.0;
        };

        let initial = self.parameters.specific_energy(&first.state());
        let max_deviation = self
            .samples
            .iter()
            .map(|sample| (self.parameters.specific_energy(&sample.state()) - initial).abs())
            .fold(0.0, f64::max);

        if initial > 0.0 {
            max_deviation / initial
        } else {
            max_deviation
        }
    }
}
