use std::path::Path;

use anyhow::Context;
use swing_pendulum::{
    SweepSpec, lab, period, report, storage,
    sweep::{self, WrittenTrajectory},
};
use tracing::{info, warn};

use crate::config::Config;

/// Simulates every angle of the sweep and writes one file per angle.
pub fn sweep(
    initial: i32,
    final_angle: i32,
    increment: i32,
    data_dir: &Path,
    config: Option<&Path>,
) -> anyhow::Result<Vec<WrittenTrajectory>> {
    let config = Config::load_or_default(config)?;
    let spec = SweepSpec::new(initial, final_angle, increment)?;
    let parameters = config.parameters().context("invalid [pendulum] section")?;
    let simulation = config.simulation().context("invalid [simulation] section")?;

    let written = sweep::run(&spec, data_dir, &parameters, &simulation)
        .with_context(|| format!("sweep into {} failed", data_dir.display()))?;
    Ok(written)
}

/// Extracts the period of every trajectory in `data_dir` and writes a report.
pub fn periods(data_dir: &Path, output_dir: &Path, name: &str) -> anyhow::Result<()> {
    let report = report::periods(data_dir)
        .with_context(|| format!("cannot read trajectories from {}", data_dir.display()))?;

    for entry in &report.entries {
        info!(
            angle = entry.angle_degrees,
            period = entry.period,
            small_angle = entry.small_angle_period,
            "period"
        );
    }

    report::write_periods(&report, output_dir, name)?;
    Ok(())
}

/// Compares simulated periods in `data_dir` with the lab reference.
pub fn compare(data_dir: &Path, output_dir: &Path, name: &str) -> anyhow::Result<()> {
    let report = report::periods(data_dir)
        .with_context(|| format!("cannot read trajectories from {}", data_dir.display()))?;
    let comparison =
        report::compare(&report, lab::REFERENCE).context("cannot fit the lab periods")?;
    info!(m = comparison.fit.m, b = comparison.fit.b, "fitted lab period curve");

    for row in &comparison.rows {
        match (row.simulated, row.difference) {
            (Some(simulated), Some(difference)) => info!(
                angle = row.angle_degrees,
                lab = row.lab_mean,
                fitted = row.fitted,
                simulated,
                difference,
                "comparison"
            ),
            _ => warn!(
                angle = row.angle_degrees,
                lab = row.lab_mean,
                "no simulated period at this angle"
            ),
        }
    }
    if let Some(offset) = comparison.mean_offset {
        info!(offset, "mean offset from lab");
    }

    report::write_comparison(&comparison, output_dir, name)?;
    Ok(())
}

/// Logs a summary of a single trajectory file.
pub fn inspect(file: &Path) -> anyhow::Result<()> {
    let trajectory = storage::load(file)?;
    let parameters = trajectory.parameters();

    info!(
        angle = trajectory.initial_angle_degrees(),
        samples = trajectory.len(),
        duration = trajectory.duration(),
        time_step = trajectory.time_step(),
        scheme = %trajectory.scheme(),
        "{}",
        file.display()
    );
    info!(
        length = parameters.length(),
        gravity = parameters.gravity(),
        damping = parameters.damping(),
        "parameters"
    );
    info!(drift = trajectory.energy_drift(), "energy drift");

    match period::extract_period(&trajectory) {
        Ok(period) => info!(period, small_angle = parameters.small_angle_period(), "period"),
        Err(err) => warn!("no period: {err}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn quick_config(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("swing.toml");
        fs::write(
            &path,
            "[pendulum]\nlength = 0.15\ngravity = 9.8\n\n[simulation]\nduration = 1.5\ntime_step = 0.001\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn sweep_then_reports() {
        let data = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = quick_config(&out);

        let written = sweep(5, 25, 10, data.path(), Some(&config)).unwrap();
        assert_eq!(written.len(), 3);

        periods(data.path(), out.path(), report::PERIODS_FILE).unwrap();
        compare(data.path(), out.path(), report::COMPARISON_FILE).unwrap();

        assert!(out.path().join("periods.json").is_file());
        assert!(out.path().join("comparison.json").is_file());
        inspect(&written[0].path).unwrap();
    }

    #[test]
    fn sweep_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("data");

        let err = sweep(0, 10, 5, &missing, None).unwrap_err();

        assert!(format!("{err:#}").contains("directory not found"));
        assert!(!missing.exists());
    }

    #[test]
    fn invalid_sweep_range_fails() {
        let dir = TempDir::new().unwrap();
        assert!(sweep(10, 0, 5, dir.path(), None).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn inspect_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.dat");
        fs::write(&path, "[]").unwrap();

        assert!(inspect(&path).is_err());
    }
}
