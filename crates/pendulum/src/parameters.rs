use std::f64::consts::PI;

use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Frequency, Length},
    frequency::hertz,
    length::meter,
};

use crate::{
    PendulumState,
    error::{Error, require_non_negative, require_positive},
};

/// Fixed physical constants of a single pendulum run.
///
/// Values are validated on construction and stored in SI units:
///
/// - `length` (m): strictly positive
/// - `gravity` (m/s²): strictly positive
/// - `damping` (1/s): non-negative, zero by default
///
/// The equation of motion these parameters define is
///
/// ```text
/// θ'' = -(g / L) sin θ - c θ'
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParameters {
    length: f64,
    gravity: f64,
    damping: f64,
}

impl PendulumParameters {
    /// Creates undamped parameters from unit-safe quantities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `length` or `gravity` is not
    /// strictly positive and finite.
    pub fn new(length: Length, gravity: Acceleration) -> Result<Self, Error> {
        Self::from_si(
            length.get::<meter>(),
            gravity.get::<meter_per_second_squared>(),
            0.0,
        )
    }

    /// Creates parameters from raw SI values (m, m/s², 1/s).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any value is out of range.
    pub fn from_si(length: f64, gravity: f64, damping: f64) -> Result<Self, Error> {
        Ok(Self {
            length: require_positive("length", length)?,
            gravity: require_positive("gravity", gravity)?,
            damping: require_non_negative("damping", damping)?,
        })
    }

    /// Returns a copy with the given viscous damping coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `damping` is negative or not finite.
    pub fn with_damping(self, damping: Frequency) -> Result<Self, Error> {
        Self::from_si(self.length, self.gravity, damping.get::<hertz>())
    }

    /// Pendulum length in meters.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Gravitational acceleration in m/s².
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Viscous damping coefficient in 1/s.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Natural angular frequency `√(g/L)` in rad/s.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.gravity / self.length).sqrt()
    }

    /// Angular acceleration at `state` from the equation of motion.
    #[must_use]
    pub fn angular_acceleration(&self, state: &PendulumState) -> f64 {
        let restoring = -(self.gravity / self.length) * state.angle().sin();
        restoring - self.damping * state.angular_velocity()
    }

    /// Small-angle period `2π√(L/g)` in seconds.
    #[must_use]
    pub fn small_angle_period(&self) -> f64 {
        2.0 * PI / self.natural_frequency()
    }

    /// Exact undamped period for a release from rest at `amplitude` radians.
    ///
    /// Uses the arithmetic-geometric mean form of the complete elliptic
    /// integral, `T = T₀ / AGM(1, cos(θ₀/2))`. Returns infinity for a release
    /// at the inverted position, where the pendulum balances forever.
    #[must_use]
    pub fn period_for_amplitude(&self, amplitude: f64) -> f64 {
        let k_prime = (amplitude / 2.0).cos().abs();
        if k_prime <= f64::EPSILON {
            return f64::INFINITY;
        }
        self.small_angle_period() / arithmetic_geometric_mean(1.0, k_prime)
    }

    /// Mechanical energy per unit mass (J/kg), zero at rest at the bottom.
    #[must_use]
    pub fn specific_energy(&self, state: &PendulumState) -> f64 {
        let speed = self.length * state.angular_velocity();
        0.5 * speed * speed + self.gravity * self.length * (1.0 - state.angle().cos())
    }
}

fn arithmetic_geometric_mean(mut a: f64, mut b: f64) -> f64 {
    // Converges quadratically; a handful of iterations reaches machine precision.
    for _ in 0..64 {
        if (a - b).abs() <= f64::EPSILON * a {
            break;
        }
        (a, b) = (0.5 * (a + b), (a * b).sqrt());
    }
    a
}
