//! Shared setup for the cross-crate tests in `tests/`.

use std::path::Path;

use swing_pendulum::{
    PendulumParameters, Scheme, SimulationConfig, SweepSpec,
    sweep::{self, WrittenTrajectory},
};
use tempfile::TempDir;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, Time},
    length::meter,
    time::second,
};

/// A 1 m pendulum under standard gravity.
#[must_use]
pub fn meter_pendulum() -> PendulumParameters {
    PendulumParameters::new(
        Length::new::<meter>(1.0),
        Acceleration::new::<meter_per_second_squared>(9.81),
    )
    .unwrap()
}

/// Run settings in seconds.
#[must_use]
pub fn run(duration: f64, time_step: f64, scheme: Scheme) -> SimulationConfig {
    SimulationConfig::new(
        Time::new::<second>(duration),
        Time::new::<second>(time_step),
        scheme,
    )
    .unwrap()
}

/// Sweeps `initial..=last` by `increment` into a fresh temporary directory.
pub fn sweep_into_temp_dir(
    initial: i32,
    last: i32,
    increment: i32,
    parameters: &PendulumParameters,
    config: &SimulationConfig,
) -> (TempDir, Vec<WrittenTrajectory>) {
    let dir = TempDir::new().unwrap();
    let written = sweep_into(dir.path(), initial, last, increment, parameters, config);
    (dir, written)
}

/// Sweeps into an existing directory.
pub fn sweep_into(
    dir: &Path,
    initial: i32,
    last: i32,
    increment: i32,
    parameters: &PendulumParameters,
    config: &SimulationConfig,
) -> Vec<WrittenTrajectory> {
    let spec = SweepSpec::new(initial, last, increment).unwrap();
    sweep::run(&spec, dir, parameters, config).unwrap()
}
