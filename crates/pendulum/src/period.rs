//! Oscillation period extraction from a sampled trajectory.
//!
//! Crossings are measured on the displacement from the stable equilibrium
//! nearest the release, so a release at 190° swings about 360° exactly like
//! one at -170° swings about 0°. The displacement changes sign twice per
//! period. Each sign change is located by linear interpolation between the
//! two samples that bracket it, and the period is twice the mean spacing
//! between the first and last crossing. Averaging over every recorded
//! crossing keeps step quantization error well below the step size.

use std::f64::consts::TAU;

use crate::{Error, Sample, Trajectory};

/// Fewest zero crossings needed to span a full period.
pub const MIN_CROSSINGS: usize = 3;

/// Returns the interpolated times at which the displacement from equilibrium
/// changes sign.
///
/// The equilibrium is the multiple of 2π nearest the first sample. A sample
/// that lands exactly on it counts once, as the end of the interval that
/// reached it. A release from rest at the bottom never crosses.
#[must_use]
pub fn zero_crossings(trajectory: &Trajectory) -> Vec<f64> {
    let samples = trajectory.samples();
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let equilibrium = TAU * (first.angle / TAU).round();

    samples
        .windows(2)
        .filter_map(|pair| crossing_time(&pair[0], &pair[1], equilibrium))
        .collect()
}

fn crossing_time(before: &Sample, after: &Sample, equilibrium: f64) -> Option<f64> {
    let (a, b) = (before.angle - equilibrium, after.angle - equilibrium);
    let crosses = (a < 0.0 && b >= 0.0) || (a > 0.0 && b <= 0.0);
    if !crosses {
        return None;
    }

    let fraction = a / (a - b);
    Some(before.time + fraction * (after.time - before.time))
}

/// Extracts the dominant oscillation period of a trajectory in seconds.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] if the trajectory holds fewer than
/// [`MIN_CROSSINGS`] zero crossings.
pub fn extract_period(trajectory: &Trajectory) -> Result<f64, Error> {
    let crossings = zero_crossings(trajectory);

    if crossings.len() < MIN_CROSSINGS {
        return Err(Error::InsufficientData {
            crossings: crossings.len(),
            needed: MIN_CROSSINGS,
        });
    }

    let span = crossings[crossings.len() - 1] - crossings[0];
    #[allow(clippy::cast_precision_loss)]
    let intervals = (crossings.len() - 1) as f64;
    Ok(2.0 * span / intervals)
}
