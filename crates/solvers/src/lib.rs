//! Numerical solvers for the Swing workspace.
//!
//! - [`transient`]: fixed-step time integration of [`OdeProblem`]s
//!
//! [`OdeProblem`]: swing_core::OdeProblem

pub mod transient;
