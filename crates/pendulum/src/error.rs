use std::{io, path::PathBuf};

use swing_solvers::transient::fixed_step;
use thiserror::Error;

/// Errors produced while simulating, persisting, or analyzing pendulum runs.
#[derive(Debug, Error)]
pub enum Error {
    /// A physical or numerical input is out of its valid range.
    #[error("invalid parameter `{name}` ({value}): {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A required directory does not exist. Directories are never created.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The trajectory is too short to measure a period.
    #[error("insufficient data: found {crossings} zero crossings, need at least {needed}")]
    InsufficientData { crossings: usize, needed: usize },

    /// A persisted trajectory file could not be read back.
    #[error("malformed trajectory file {}: {reason}", path.display())]
    MalformedTrajectoryFile { path: PathBuf, reason: String },

    /// Writing a file failed.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The period curve could not be fitted to the given points.
    #[error("curve fit failed: {reason}")]
    FitFailed { reason: &'static str },

    /// A single angle of a sweep failed; earlier angles are already on disk.
    #[error("sweep failed at {angle} degrees")]
    SweepAngle {
        angle: i32,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Solver(#[from] fixed_step::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedTrajectoryFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Ensures `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, Error> {
    if !value.is_finite() {
        Err(Error::invalid(name, value, "must be finite"))
    } else if value <= 0.0 {
        Err(Error::invalid(name, value, "must be greater than zero"))
    } else {
        Ok(value)
    }
}

/// Ensures `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, Error> {
    if !value.is_finite() {
        Err(Error::invalid(name, value, "must be finite"))
    } else if value < 0.0 {
        Err(Error::invalid(name, value, "must not be negative"))
    } else {
        Ok(value)
    }
}
