//! Nonlinear pendulum simulation for the Swing workspace.
//!
//! The crate is organized leaf-first:
//!
//! - [`PendulumState`] and [`PendulumParameters`]: the dynamical state and
//!   the fixed physical constants of one run
//! - [`integrator`]: advances a state by one fixed time step
//! - [`runner`]: integrates one initial angle into a [`Trajectory`]
//! - [`sweep`]: runs a range of initial angles and persists one file each
//! - [`period`]: extracts the oscillation period from a trajectory
//! - [`storage`]: the on-disk trajectory format and angle-keyed file names
//! - [`lab`], [`fit`] and [`report`]: period aggregation, the fitted lab
//!   period curve, and lab comparison over a persisted run
//!
//! # Example
//!
//! ```no_run
//! use swing_pendulum::{PendulumParameters, SimulationConfig, period, runner};
//! use uom::si::{acceleration::meter_per_second_squared, f64::{Acceleration, Length}, length::meter};
//!
//! let parameters = PendulumParameters::new(
//!     Length::new::<meter>(1.0),
//!     Acceleration::new::<meter_per_second_squared>(9.81),
//! )?;
//! let trajectory = runner::simulate(&parameters, 5, &SimulationConfig::default())?;
//! let period = period::extract_period(&trajectory)?;
//! # Ok::<(), swing_pendulum::Error>(())
//! ```

mod error;
mod model;
mod parameters;
mod state;
mod trajectory;

pub mod fit;
pub mod integrator;
pub mod lab;
pub mod period;
pub mod report;
pub mod runner;
pub mod storage;
pub mod sweep;

pub use error::Error;
pub use model::{ModelError, PendulumModel, PendulumProblem};
pub use parameters::PendulumParameters;
pub use runner::SimulationConfig;
pub use state::{PendulumState, StateDerivative};
pub use swing_solvers::transient::fixed_step::Scheme;
pub use sweep::SweepSpec;
pub use trajectory::{Sample, Trajectory};
