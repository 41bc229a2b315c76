//! Least-squares fit of the empirical period curve.
//!
//! Measured periods are modeled as
//!
//! ```text
//! T(θ) = T₀ / √cos(m·θ) + b
//! ```
//!
//! where `T₀ = 2π√(L/g)` is the small-angle period, `m` stretches the angle
//! axis, and `b` absorbs a constant timing offset. The fit runs Gauss–Newton
//! on `(m, b)` with step halving, starting from `m = 1` and the offset that is
//! optimal for it.

use serde::Serialize;

use crate::Error;

const MAX_ITERATIONS: usize = 200;
const MIN_STEP_FRACTION: f64 = 1e-12;
const TOLERANCE: f64 = 1e-12;

/// Fitted parameters of the period curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodCurve {
    /// Angle scale factor `m`.
    pub m: f64,
    /// Constant offset `b` in seconds.
    pub b: f64,
    /// The fixed `T₀` in seconds.
    pub small_angle_period: f64,
}

impl PeriodCurve {
    /// Period predicted at `angle` radians.
    #[must_use]
    pub fn period_at(&self, angle: f64) -> f64 {
        scaled_period(self.small_angle_period, self.m, angle) + self.b
    }
}

fn scaled_period(small_angle_period: f64, m: f64, angle: f64) -> f64 {
    small_angle_period / (m * angle).cos().sqrt()
}

/// Fits `(m, b)` to `(angle in radians, period in seconds)` points.
///
/// # Errors
///
/// Returns [`Error::FitFailed`] with fewer than two distinct nonzero angles,
/// non-finite input, or when the iteration does not settle.
pub fn fit_period_curve(points: &[(f64, f64)], small_angle_period: f64) -> Result<PeriodCurve, Error> {
    if points.len() < 2 {
        return Err(Error::FitFailed {
            reason: "need at least two points",
        });
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(Error::FitFailed {
            reason: "non-finite point",
        });
    }

    let t0 = small_angle_period;
    let sum_of_squares = |m: f64, b: f64| -> Option<f64> {
        points.iter().try_fold(0.0, |sum, &(x, y)| {
            let cos = (m * x).cos();
            (cos > 0.0).then(|| {
                let r = t0 / cos.sqrt() + b - y;
                sum + r * r
            })
        })
    };

    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let mut m = 1.0;
    if sum_of_squares(m, 0.0).is_none() {
        return Err(Error::FitFailed {
            reason: "angles beyond the model's domain",
        });
    }
    let mut b = points
        .iter()
        .map(|&(x, y)| y - scaled_period(t0, m, x))
        .sum::<f64>()
        / n;

    for _ in 0..MAX_ITERATIONS {
        // Normal equations of the 2x2 linearized problem.
        let (mut jj, mut j1, mut jr, mut r1) = (0.0, 0.0, 0.0, 0.0);
        for &(x, y) in points {
            let cos = (m * x).cos();
            let residual = t0 / cos.sqrt() + b - y;
            let dm = 0.5 * t0 * (m * x).sin() * x / cos.powf(1.5);
            jj += dm * dm;
            j1 += dm;
            jr += dm * residual;
            r1 += residual;
        }
        let det = jj * n - j1 * j1;
        if det.abs() <= f64::EPSILON * jj * n {
            return Err(Error::FitFailed {
                reason: "angle scale is not identifiable from these points",
            });
        }
        let step_m = -(n * jr - j1 * r1) / det;
        let step_b = -(jj * r1 - j1 * jr) / det;

        let Some(current) = sum_of_squares(m, b) else {
            return Err(Error::FitFailed {
                reason: "left the model's domain",
            });
        };

        let mut fraction = 1.0;
        loop {
            let (next_m, next_b) = (m + fraction * step_m, b + fraction * step_b);
            if sum_of_squares(next_m, next_b).is_some_and(|next| next <= current) {
                break;
            }
            fraction /= 2.0;
            if fraction < MIN_STEP_FRACTION {
                // No descent left: already at the minimum.
                return Ok(PeriodCurve {
                    m,
                    b,
                    small_angle_period: t0,
                });
            }
        }

        m += fraction * step_m;
        b += fraction * step_b;

        let settled = (fraction * step_m).abs() <= TOLERANCE * (1.0 + m.abs())
            && (fraction * step_b).abs() <= TOLERANCE * (1.0 + b.abs());
        if settled {
            return Ok(PeriodCurve {
                m,
                b,
                small_angle_period: t0,
            });
        }
    }

    Err(Error::FitFailed {
        reason: "did not converge",
    })
}
