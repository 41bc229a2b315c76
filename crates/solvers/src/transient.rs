//! Solvers for transient problems, advancing a state through time.
//!
//! An [`OdeProblem`] extracts a state from model input and a derivative from
//! model output. Solvers in this module step that state forward by a fixed
//! increment and record a snapshot after every step.
//!
//! # Solvers
//!
//! - [`fixed_step`]: explicit fixed-step integration with a selectable
//!   [`Scheme`](fixed_step::Scheme) (forward Euler, Heun, classic RK4)
//!
//! [`OdeProblem`]: swing_core::OdeProblem

pub mod fixed_step;
