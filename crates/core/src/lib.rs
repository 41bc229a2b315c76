//! Traits shared by the Swing solvers and the pendulum model.
//!
//! A [`Model`] evaluates inputs, an [`OdeProblem`] tells a time integrator how
//! to read and rebuild those inputs as a [`StepIntegrable`] state, and an
//! [`Observer`] watches each accepted [`Snapshot`] and may stop the run.

mod model;
mod observer;
mod ode;
mod step;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use ode::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
