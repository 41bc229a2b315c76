//! On-disk trajectory format.
//!
//! Each trajectory lives in its own JSON file named after its release angle,
//! so a run directory can be re-read without an index. Floats are written in
//! shortest round-trip form and parsed back bit-exactly.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "initial_angle_degrees": 10,
//!   "parameters": { "length": 1.0, "gravity": 9.81, "damping": 0.0 },
//!   "time_step": 0.001,
//!   "scheme": "rk4",
//!   "samples": [{ "time": 0.0, "angle": 0.17453292519943295, "angular_velocity": 0.0 }]
//! }
//! ```

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use swing_solvers::transient::fixed_step::Scheme;

use crate::{Error, PendulumParameters, Sample, Trajectory};

/// Version written to every trajectory file.
pub const FORMAT_VERSION: u32 = 1;

const FILE_SUFFIX: &str = "_degrees.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrajectoryFile<'a> {
    format_version: u32,
    initial_angle_degrees: i32,
    parameters: ParametersRecord,
    time_step: f64,
    scheme: Scheme,
    samples: Cow<'a, [Sample]>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParametersRecord {
    length: f64,
    gravity: f64,
    damping: f64,
}

/// Returns the file name that stores the trajectory for `angle` degrees.
#[must_use]
pub fn trajectory_file_name(angle: i32) -> String {
    format!("{angle}{FILE_SUFFIX}")
}

/// Recovers the angle from a name produced by [`trajectory_file_name`].
#[must_use]
pub fn angle_from_file_name(name: &str) -> Option<i32> {
    name.strip_suffix(FILE_SUFFIX)?.parse().ok()
}

/// Writes `trajectory` to `path`, replacing any existing file.
///
/// The data is written to a sibling temporary file first and renamed into
/// place, so readers never observe a partially written trajectory.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn save(trajectory: &Trajectory, path: &Path) -> Result<(), Error> {
    let parameters = trajectory.parameters();
    let file = TrajectoryFile {
        format_version: FORMAT_VERSION,
        initial_angle_degrees: trajectory.initial_angle_degrees(),
        parameters: ParametersRecord {
            length: parameters.length(),
            gravity: parameters.gravity(),
            damping: parameters.damping(),
        },
        time_step: trajectory.time_step(),
        scheme: trajectory.scheme(),
        samples: Cow::Borrowed(trajectory.samples()),
    };

    let bytes = serde_json::to_vec(&file).map_err(|err| Error::io(path, err.into()))?;
    write_atomic(path, &bytes)
}

/// Reads a trajectory previously written by [`save`].
///
/// # Errors
///
/// Returns [`Error::MalformedTrajectoryFile`] if the file cannot be read,
/// does not parse, has an unsupported version, or violates the trajectory
/// invariants (no samples, non-finite values, non-increasing times).
pub fn load(path: &Path) -> Result<Trajectory, Error> {
    let bytes = fs::read(path).map_err(|err| Error::malformed(path, err))?;
    let file: TrajectoryFile<'static> =
        serde_json::from_slice(&bytes).map_err(|err| Error::malformed(path, err))?;

    if file.format_version != FORMAT_VERSION {
        return Err(Error::malformed(
            path,
            format!("unsupported format version {}", file.format_version),
        ));
    }

    let ParametersRecord {
        length,
        gravity,
        damping,
    } = file.parameters;
    let parameters = PendulumParameters::from_si(length, gravity, damping)
        .map_err(|err| Error::malformed(path, err))?;

    if !(file.time_step.is_finite() && file.time_step > 0.0) {
        return Err(Error::malformed(path, "time step must be positive"));
    }

    let samples = file.samples.into_owned();
    check_samples(&samples).map_err(|reason| Error::malformed(path, reason))?;

    Ok(Trajectory::from_parts(
        file.initial_angle_degrees,
        parameters,
        file.time_step,
        file.scheme,
        samples,
    ))
}

fn check_samples(samples: &[Sample]) -> Result<(), &'static str> {
    let Some(first) = samples.first() else {
        return Err("no samples");
    };
    if first.time != 0.0 {
        return Err("first sample is not at time zero");
    }

    let all_finite = samples.iter().all(|sample| {
        sample.time.is_finite() && sample.angle.is_finite() && sample.angular_velocity.is_finite()
    });
    if !all_finite {
        return Err("non-finite sample value");
    }

    if samples.windows(2).any(|pair| pair[1].time <= pair[0].time) {
        return Err("sample times are not strictly increasing");
    }

    Ok(())
}

/// Lists the trajectory files in `directory` as `(angle, path)`, sorted by angle.
///
/// Files whose names do not follow [`trajectory_file_name`] are ignored.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `directory` is missing, or
/// [`Error::Io`] if it cannot be listed.
pub fn scan(directory: &Path) -> Result<Vec<(i32, PathBuf)>, Error> {
    require_directory(directory)?;

    let entries = fs::read_dir(directory).map_err(|err| Error::io(directory, err))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::io(directory, err))?;
        let name = entry.file_name();
        if let Some(angle) = name.to_str().and_then(angle_from_file_name) {
            found.push((angle, entry.path()));
        }
    }

    found.sort_by_key(|(angle, _)| *angle);
    Ok(found)
}

/// Fails with [`Error::DirectoryNotFound`] unless `directory` is an existing directory.
pub(crate) fn require_directory(directory: &Path) -> Result<(), Error> {
    if directory.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound(directory.to_path_buf()))
    }
}

/// Writes `bytes` to a temporary sibling of `path`, then renames it into place.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let mut temporary = path.as_os_str().to_owned();
    temporary.push(".tmp");
    let temporary = PathBuf::from(temporary);

    fs::write(&temporary, bytes).map_err(|err| Error::io(&temporary, err))?;
    fs::rename(&temporary, path).map_err(|err| {
        let _ = fs::remove_file(&temporary);
        Error::io(path, err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::{SimulationConfig, runner};

    fn short_run(angle: i32) -> Trajectory {
        let parameters = PendulumParameters::from_si(0.75, 9.81, 0.05).unwrap();
        let config = SimulationConfig::from_si(0.5, 0.001, Scheme::Heun).unwrap();
        runner::simulate(&parameters, angle, &config).unwrap()
    }

    #[test]
    fn file_names_round_trip_angles() {
        for angle in [0, 5, 90, -15, 360] {
            let name = trajectory_file_name(angle);
            assert_eq!(angle_from_file_name(&name), Some(angle));
        }
        assert_eq!(trajectory_file_name(-15), "-15_degrees.json");
    }

    #[test]
    fn foreign_file_names_are_not_angles() {
        for name in [
            "periods.json",
            "5_degrees.json.tmp",
            "five_degrees.json",
            "5 degrees.json",
        ] {
            assert_eq!(angle_from_file_name(name), None, "{name}");
        }
    }

    #[test]
    fn saved_trajectory_loads_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(trajectory_file_name(25));
        let trajectory = short_run(25);

        save(&trajectory, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, trajectory);
        assert_eq!(loaded.len(), 501);
        for (a, b) in loaded.samples().iter().zip(trajectory.samples()) {
            assert_eq!(a.angle.to_bits(), b.angle.to_bits());
            assert_eq!(a.angular_velocity.to_bits(), b.angular_velocity.to_bits());
        }
    }

    #[test]
    fn save_leaves_no_temporary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(trajectory_file_name(10));

        save(&short_run(10), &path).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("10_degrees.json")]);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"{ \"format_version\": 1, \"samples\": [").unwrap();

        assert!(matches!(
            load(&path),
            Err(Error::MalformedTrajectoryFile { .. })
        ));
    }

    #[test]
    fn load_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load(&dir.path().join("absent.json")),
            Err(Error::MalformedTrajectoryFile { .. })
        ));
    }

    #[test]
    fn load_rejects_unknown_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("future.json");
        let text = r#"{
            "format_version": 2,
            "initial_angle_degrees": 5,
            "parameters": { "length": 1.0, "gravity": 9.81, "damping": 0.0 },
            "time_step": 0.001,
            "scheme": "rk4",
            "samples": [{ "time": 0.0, "angle": 0.1, "angular_velocity": 0.0 }]
        }"#;
        fs::write(&path, text).unwrap();

        let Err(Error::MalformedTrajectoryFile { reason, .. }) = load(&path) else {
            panic!("expected a malformed file error");
        };
        assert!(reason.contains("version 2"));
    }

    #[test]
    fn load_rejects_out_of_order_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shuffled.json");
        let text = r#"{
            "format_version": 1,
            "initial_angle_degrees": 5,
            "parameters": { "length": 1.0, "gravity": 9.81, "damping": 0.0 },
            "time_step": 0.001,
            "scheme": "heun",
            "samples": [
                { "time": 0.0, "angle": 0.1, "angular_velocity": 0.0 },
                { "time": 0.002, "angle": 0.1, "angular_velocity": 0.0 },
                { "time": 0.001, "angle": 0.1, "angular_velocity": 0.0 }
            ]
        }"#;
        fs::write(&path, text).unwrap();

        assert!(matches!(
            load(&path),
            Err(Error::MalformedTrajectoryFile { .. })
        ));
    }

    #[test]
    fn load_rejects_non_physical_parameters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("negative.json");
        let text = r#"{
            "format_version": 1,
            "initial_angle_degrees": 5,
            "parameters": { "length": -1.0, "gravity": 9.81, "damping": 0.0 },
            "time_step": 0.001,
            "scheme": "rk4",
            "samples": [{ "time": 0.0, "angle": 0.1, "angular_velocity": 0.0 }]
        }"#;
        fs::write(&path, text).unwrap();

        assert!(matches!(
            load(&path),
            Err(Error::MalformedTrajectoryFile { .. })
        ));
    }

    #[test]
    fn scan_sorts_by_angle_and_skips_other_files() {
        let dir = TempDir::new().unwrap();
        for angle in [30, -10, 5] {
            save(&short_run(angle), &dir.path().join(trajectory_file_name(angle))).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "not a trajectory").unwrap();

        let found = scan(dir.path()).unwrap();

        let angles: Vec<i32> = found.iter().map(|(angle, _)| *angle).collect();
        assert_eq!(angles, vec![-10, 5, 30]);
        assert!(found.iter().all(|(angle, path)| path.ends_with(trajectory_file_name(*angle))));
    }

    #[test]
    fn scan_requires_existing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        assert!(matches!(scan(&missing), Err(Error::DirectoryNotFound(path)) if path == missing));
    }
}
