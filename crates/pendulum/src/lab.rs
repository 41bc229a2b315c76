//! Hand-timed lab periods used as the reference for simulated runs.

use crate::{
    Error, PendulumParameters,
    fit::{PeriodCurve, fit_period_curve},
};

/// String length of the lab pendulum, in meters.
pub const LAB_LENGTH: f64 = 0.15;

/// Gravitational acceleration assumed for the lab, in m/s².
pub const LAB_GRAVITY: f64 = 9.8;

/// Timed periods for one release angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabMeasurement {
    pub angle_degrees: i32,
    /// Individual trial periods in seconds.
    pub trials: &'static [f64],
}

impl LabMeasurement {
    /// Mean of the trial periods.
    #[must_use]
    pub fn mean(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let count = self.trials.len() as f64;
        self.trials.iter().sum::<f64>() / count
    }
}

/// Three trials per angle from 5° to 75° in 10° steps.
pub const REFERENCE: &[LabMeasurement] = &[
    LabMeasurement {
        angle_degrees: 5,
        trials: &[0.7116, 0.5842, 0.6310],
    },
    LabMeasurement {
        angle_degrees: 15,
        trials: &[0.6386, 0.6478, 0.6410],
    },
    LabMeasurement {
        angle_degrees: 25,
        trials: &[0.6642, 0.6600, 0.6612],
    },
    LabMeasurement {
        angle_degrees: 35,
        trials: &[0.6858, 0.6876, 0.6698],
    },
    LabMeasurement {
        angle_degrees: 45,
        trials: &[0.6966, 0.6978, 0.7042],
    },
    LabMeasurement {
        angle_degrees: 55,
        trials: &[0.7152, 0.7124, 0.7204],
    },
    LabMeasurement {
        angle_degrees: 65,
        trials: &[0.7440, 0.7356, 0.7350],
    },
    LabMeasurement {
        angle_degrees: 75,
        trials: &[0.7672, 0.7704, 0.7724],
    },
];

/// Parameters of the undamped lab pendulum.
///
/// # Errors
///
/// Never fails for the built-in constants; the `Result` mirrors
/// [`PendulumParameters::from_si`].
pub fn lab_parameters() -> Result<PendulumParameters, Error> {
    PendulumParameters::from_si(LAB_LENGTH, LAB_GRAVITY, 0.0)
}

/// Fits the period curve to the mean of each measurement, with `T₀` of the
/// lab pendulum.
///
/// # Errors
///
/// Returns [`Error::FitFailed`] if the curve cannot be fitted.
pub fn fit_measurements(measurements: &[LabMeasurement]) -> Result<PeriodCurve, Error> {
    let points: Vec<(f64, f64)> = measurements
        .iter()
        .map(|m| (f64::from(m.angle_degrees).to_radians(), m.mean()))
        .collect();
    fit_period_curve(&points, lab_parameters()?.small_angle_period())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reference_covers_every_tenth_degree_from_five() {
        let angles: Vec<i32> = REFERENCE.iter().map(|m| m.angle_degrees).collect();
        assert_eq!(angles, vec![5, 15, 25, 35, 45, 55, 65, 75]);
        assert!(REFERENCE.iter().all(|m| m.trials.len() == 3));
    }

    #[test]
    fn mean_of_trials() {
        assert_relative_eq!(REFERENCE[2].mean(), 0.661_8, epsilon = 1e-12);
    }

    #[test]
    fn measured_periods_grow_with_amplitude_above_fifteen_degrees() {
        let means: Vec<f64> = REFERENCE[1..].iter().map(LabMeasurement::mean).collect();
        assert!(means.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn lab_small_angle_period() {
        let parameters = lab_parameters().unwrap();
        assert_relative_eq!(parameters.small_angle_period(), 0.777, epsilon = 1e-3);
    }

    #[test]
    fn reference_fit() {
        let curve = fit_measurements(REFERENCE).unwrap();

        assert_relative_eq!(curve.m, 0.563_9, epsilon = 1e-3);
        assert_relative_eq!(curve.b, -0.128_5, epsilon = 1e-3);
        for measurement in REFERENCE {
            let angle = f64::from(measurement.angle_degrees).to_radians();
            assert_relative_eq!(curve.period_at(angle), measurement.mean(), epsilon = 0.015);
        }
    }
}
