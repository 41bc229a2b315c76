//! Runs a range of release angles and persists one trajectory file per angle.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    Error, PendulumParameters, SimulationConfig, runner,
    storage::{self, require_directory},
};

/// An inclusive range of integer release angles in degrees.
///
/// The realized angles are `initial, initial + increment, ...` up to and
/// including `final_angle` only when it is reached exactly. With
/// `initial = 5, final = 20, increment = 7` the angles are `{5, 12, 19}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSpec {
    initial_angle: i32,
    final_angle: i32,
    increment: i32,
}

impl SweepSpec {
    /// Creates a sweep specification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `increment` is not positive or
    /// `final_angle` is below `initial_angle`.
    pub fn new(initial_angle: i32, final_angle: i32, increment: i32) -> Result<Self, Error> {
        if increment <= 0 {
            return Err(Error::invalid(
                "increment",
                f64::from(increment),
                "must be greater than zero",
            ));
        }
        if final_angle < initial_angle {
            return Err(Error::invalid(
                "final_angle",
                f64::from(final_angle),
                "must not be below the initial angle",
            ));
        }
        Ok(Self {
            initial_angle,
            final_angle,
            increment,
        })
    }

    #[must_use]
    pub fn initial_angle(&self) -> i32 {
        self.initial_angle
    }

    #[must_use]
    pub fn final_angle(&self) -> i32 {
        self.final_angle
    }

    #[must_use]
    pub fn increment(&self) -> i32 {
        self.increment
    }

    /// Iterates over the realized angles in ascending order.
    #[allow(clippy::cast_sign_loss)]
    pub fn angles(&self) -> impl Iterator<Item = i32> + use<> {
        // Positive on construction.
        (self.initial_angle..=self.final_angle).step_by(self.increment as usize)
    }

    /// Number of realized angles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.angles().count()
    }

    /// Always `false`: a valid spec realizes at least its initial angle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// One trajectory file written by a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTrajectory {
    pub angle: i32,
    pub path: PathBuf,
    pub samples: usize,
}

/// Runs every angle of `spec` and writes one trajectory file per angle into
/// `directory`.
///
/// Angles run strictly in ascending order. Each file is written atomically and
/// independently, so a failure at one angle leaves the files of earlier angles
/// intact. Re-running the same sweep overwrites the files with identical
/// content.
///
/// # Errors
///
/// - [`Error::DirectoryNotFound`] if `directory` does not exist, before any
///   simulation runs.
/// - [`Error::SweepAngle`] wrapping the first failure of a single angle.
pub fn run(
    spec: &SweepSpec,
    directory: &Path,
    parameters: &PendulumParameters,
    config: &SimulationConfig,
) -> Result<Vec<WrittenTrajectory>, Error> {
    require_directory(directory)?;

    info!(
        initial = spec.initial_angle(),
        last = spec.final_angle(),
        increment = spec.increment(),
        runs = spec.len(),
        scheme = %config.scheme(),
        "starting sweep into {}",
        directory.display()
    );

    let mut written = Vec::with_capacity(spec.len());
    for angle in spec.angles() {
        let path = directory.join(storage::trajectory_file_name(angle));
        let samples = run_angle(angle, &path, parameters, config).map_err(|source| {
            Error::SweepAngle {
                angle,
                source: Box::new(source),
            }
        })?;

        info!(angle, samples, "wrote {}", path.display());
        written.push(WrittenTrajectory {
            angle,
            path,
            samples,
        });
    }

    info!(files = written.len(), "sweep finished");
    Ok(written)
}

fn run_angle(
    angle: i32,
    path: &Path,
    parameters: &PendulumParameters,
    config: &SimulationConfig,
) -> Result<usize, Error> {
    let trajectory = runner::simulate(parameters, angle, config)?;
    storage::save(&trajectory, path)?;
    Ok(trajectory.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use swing_solvers::transient::fixed_step::Scheme;
    use tempfile::TempDir;

    fn parameters() -> PendulumParameters {
        PendulumParameters::from_si(1.0, 9.81, 0.0).unwrap()
    }

    fn quick() -> SimulationConfig {
        SimulationConfig::from_si(0.2, 0.001, Scheme::Rk4).unwrap()
    }

    fn angles(initial: i32, last: i32, increment: i32) -> Vec<i32> {
        SweepSpec::new(initial, last, increment)
            .unwrap()
            .angles()
            .collect()
    }

    #[test]
    fn single_angle_when_bounds_match() {
        assert_eq!(angles(10, 10, 5), vec![10]);
    }

    #[test]
    fn unreached_final_angle_is_excluded() {
        assert_eq!(angles(5, 20, 7), vec![5, 12, 19]);
    }

    #[test]
    fn exactly_reached_final_angle_is_included() {
        assert_eq!(angles(5, 75, 10), vec![5, 15, 25, 35, 45, 55, 65, 75]);
        assert_eq!(angles(-20, 20, 20), vec![-20, 0, 20]);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        assert!(matches!(
            SweepSpec::new(0, 10, 0),
            Err(Error::InvalidParameter {
                name: "increment",
                ..
            })
        ));
        assert!(matches!(
            SweepSpec::new(0, 10, -5),
            Err(Error::InvalidParameter {
                name: "increment",
                ..
            })
        ));
        assert!(matches!(
            SweepSpec::new(20, 10, 5),
            Err(Error::InvalidParameter {
                name: "final_angle",
                ..
            })
        ));
    }

    #[test]
    fn len_counts_realized_angles() {
        assert_eq!(SweepSpec::new(5, 20, 7).unwrap().len(), 3);
        assert_eq!(SweepSpec::new(i32::MAX - 1, i32::MAX, 1).unwrap().len(), 2);
    }

    #[test]
    fn writes_one_file_per_angle() {
        let dir = TempDir::new().unwrap();
        let spec = SweepSpec::new(5, 20, 7).unwrap();

        let written = run(&spec, dir.path(), &parameters(), &quick()).unwrap();

        let angles: Vec<i32> = written.iter().map(|w| w.angle).collect();
        assert_eq!(angles, vec![5, 12, 19]);
        assert!(written.iter().all(|w| w.samples == 201 && w.path.is_file()));
        assert!(!dir.path().join("20_degrees.json").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn rerun_produces_identical_files() {
        let dir = TempDir::new().unwrap();
        let spec = SweepSpec::new(10, 30, 10).unwrap();

        run(&spec, dir.path(), &parameters(), &quick()).unwrap();
        let first: Vec<Vec<u8>> = spec
            .angles()
            .map(|angle| fs::read(dir.path().join(storage::trajectory_file_name(angle))).unwrap())
            .collect();

        run(&spec, dir.path(), &parameters(), &quick()).unwrap();
        let second: Vec<Vec<u8>> = spec
            .angles()
            .map(|angle| fs::read(dir.path().join(storage::trajectory_file_name(angle))).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_directory_fails_before_writing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-here");
        let spec = SweepSpec::new(0, 30, 10).unwrap();

        let result = run(&spec, &missing, &parameters(), &quick());

        assert!(matches!(result, Err(Error::DirectoryNotFound(path)) if path == missing));
        assert!(!missing.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn file_in_place_of_directory_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain-file");
        fs::write(&file, "").unwrap();
        let spec = SweepSpec::new(0, 0, 1).unwrap();

        assert!(matches!(
            run(&spec, &file, &parameters(), &quick()),
            Err(Error::DirectoryNotFound(_))
        ));
    }
}
