/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the generic fixed-step solvers advance the
/// type via `state + derivative * delta`, where the derivative is taken with
/// respect to `Delta`. For pendulum motion the state is an angle and angular
/// velocity pair and `Delta` is a time step in seconds.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// Shorthand for the fully qualified [`StepIntegrable::Derivative`] path.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Angle(f64);
    struct AngularVelocity(f64);

    impl StepIntegrable<f64> for Angle {
        type Derivative = AngularVelocity;

        fn step(&self, derivative: AngularVelocity, delta: f64) -> Self {
            Angle(self.0 + derivative.0 * delta)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Phase([f64; 2]);
    struct PhaseRate([f64; 2]);

    impl StepIntegrable<f64> for Phase {
        type Derivative = PhaseRate;

        fn step(&self, derivative: PhaseRate, delta: f64) -> Self {
            let [angle, omega] = self.0;
            let [d_angle, d_omega] = derivative.0;
            Phase([angle + d_angle * delta, omega + d_omega * delta])
        }
    }

    #[test]
    fn step_scalar_angle() {
        let next = Angle(0.5).step(AngularVelocity(-2.0), 0.25);
        assert_eq!(next, Angle(0.0));
    }

    #[test]
    fn step_phase_pair() {
        let next = Phase([1.0, 0.0]).step(PhaseRate([0.0, -4.0]), 0.5);
        assert_eq!(next, Phase([1.0, -2.0]));
    }
}
