use std::ops::{Add, Mul};

use swing_core::StepIntegrable;
use uom::si::{angle::degree, angle::radian, f64::Angle};

use crate::Error;

/// The instantaneous dynamical state of a pendulum.
///
/// The angle is measured from the downward vertical in radians and the angular
/// velocity is in radians per second. Any finite angle is valid, including
/// angles past the horizontal or beyond a full turn, since the nonlinear
/// equation of motion is defined everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    angle: f64,
    angular_velocity: f64,
}

impl PendulumState {
    /// Creates a state from an angle (rad) and angular velocity (rad/s).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either value is not finite.
    pub fn new(angle: f64, angular_velocity: f64) -> Result<Self, Error> {
        if !angle.is_finite() {
            return Err(Error::invalid("angle", angle, "must be finite"));
        }
        if !angular_velocity.is_finite() {
            return Err(Error::invalid(
                "angular_velocity",
                angular_velocity,
                "must be finite",
            ));
        }
        Ok(Self {
            angle,
            angular_velocity,
        })
    }

    pub(crate) const fn from_parts(angle: f64, angular_velocity: f64) -> Self {
        Self {
            angle,
            angular_velocity,
        }
    }

    /// Creates a state released from rest at `degrees`.
    #[must_use]
    pub fn released_from(degrees: i32) -> Self {
        let angle = Angle::new::<degree>(f64::from(degrees));
        Self::from_parts(angle.get::<radian>(), 0.0)
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        Angle::new::<radian>(self.angle).get::<degree>()
    }

    /// Returns the angular velocity in radians per second.
    #[must_use]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Replaces both fields at once.
    pub fn update(&mut self, angle: f64, angular_velocity: f64) {
        self.angle = angle;
        self.angular_velocity = angular_velocity;
    }

    /// Returns `true` if both fields are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.angle.is_finite() && self.angular_velocity.is_finite()
    }
}

/// Time derivative of a [`PendulumState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDerivative {
    /// Rate of change of the angle (rad/s).
    pub angular_velocity: f64,

    /// Rate of change of the angular velocity (rad/s²).
    pub angular_acceleration: f64,
}

impl Add for StateDerivative {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            angular_velocity: self.angular_velocity + rhs.angular_velocity,
            angular_acceleration: self.angular_acceleration + rhs.angular_acceleration,
        }
    }
}

impl Mul<f64> for StateDerivative {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            angular_velocity: self.angular_velocity * rhs,
            angular_acceleration: self.angular_acceleration * rhs,
        }
    }
}

impl StepIntegrable<f64> for PendulumState {
    type Derivative = StateDerivative;

    fn step(&self, derivative: StateDerivative, dt: f64) -> Self {
        let mut next = *self;
        next.update(
            self.angle + derivative.angular_velocity * dt,
            self.angular_velocity + derivative.angular_acceleration * dt,
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    #[test]
    fn released_from_converts_degrees() {
        let state = PendulumState::released_from(90);
        assert_relative_eq!(state.angle(), PI / 2.0);
        assert_relative_eq!(state.angular_velocity(), 0.0);
        assert_relative_eq!(state.angle_degrees(), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn large_and_negative_angles_are_accepted() {
        assert_relative_eq!(PendulumState::released_from(270).angle(), 1.5 * PI);
        assert_relative_eq!(PendulumState::released_from(-30).angle(), -PI / 6.0);
        assert!(PendulumState::new(10.0 * PI, -3.0).is_ok());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(
            PendulumState::new(f64::NAN, 0.0),
            Err(Error::InvalidParameter { name: "angle", .. })
        ));
        assert!(matches!(
            PendulumState::new(0.0, f64::INFINITY),
            Err(Error::InvalidParameter {
                name: "angular_velocity",
                ..
            })
        ));
    }

    #[test]
    fn update_replaces_both_fields() {
        let mut state = PendulumState::released_from(10);
        state.update(-0.25, 1.5);
        assert_eq!(state, PendulumState::new(-0.25, 1.5).unwrap());
    }

    #[test]
    fn step_applies_derivative() {
        let state = PendulumState::new(0.5, 1.0).unwrap();
        let derivative = StateDerivative {
            angular_velocity: 1.0,
            angular_acceleration: -2.0,
        };

        let next = state.step(derivative, 0.25);

        assert_relative_eq!(next.angle(), 0.75);
        assert_relative_eq!(next.angular_velocity(), 0.5);
    }

    #[test]
    fn derivatives_blend_linearly() {
        let a = StateDerivative {
            angular_velocity: 1.0,
            angular_acceleration: 2.0,
        };
        let b = StateDerivative {
            angular_velocity: 3.0,
            angular_acceleration: -4.0,
        };

        let mean = (a + b) * 0.5;

        assert_relative_eq!(mean.angular_velocity, 2.0);
        assert_relative_eq!(mean.angular_acceleration, -1.0);
    }
}
