//! Period reports over a persisted sweep and their comparison to lab data.
//!
//! Reports read whatever trajectory files a run directory holds. A file that
//! cannot be loaded or is too short to measure is skipped with a warning and
//! listed in the report, so one bad file never hides the rest of a sweep.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    Error,
    fit::PeriodCurve,
    lab::{self, LabMeasurement},
    period,
    storage::{self, require_directory, write_atomic},
};

/// Default file name for [`write_periods`].
pub const PERIODS_FILE: &str = "periods.json";

/// Default file name for [`write_comparison`].
pub const COMPARISON_FILE: &str = "comparison.json";

/// The measured period of one persisted trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodEntry {
    pub angle_degrees: i32,
    /// Extracted period in seconds.
    pub period: f64,
    /// `2π√(L/g)` for the trajectory's own parameters.
    pub small_angle_period: f64,
}

/// A trajectory file left out of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodReport {
    /// Entries sorted by angle.
    pub entries: Vec<PeriodEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl PeriodReport {
    /// Returns the period measured at `angle_degrees`, if any.
    #[must_use]
    pub fn period_at(&self, angle_degrees: i32) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.angle_degrees == angle_degrees)
            .map(|entry| entry.period)
    }
}

/// Extracts the period of every trajectory file in `data_dir`.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `data_dir` is missing, or
/// [`Error::Io`] if it cannot be listed. Per-file failures are not errors.
pub fn periods(data_dir: &Path) -> Result<PeriodReport, Error> {
    let mut report = PeriodReport::default();

    for (angle, path) in storage::scan(data_dir)? {
        let measured = storage::load(&path).and_then(|trajectory| {
            let stored = trajectory.initial_angle_degrees();
            if stored != angle {
                return Err(Error::malformed(
                    &path,
                    format!("named for {angle} degrees but holds a {stored} degree release"),
                ));
            }
            let period = period::extract_period(&trajectory)?;
            Ok((period, trajectory.parameters().small_angle_period()))
        });

        match measured {
            Ok((period, small_angle_period)) => {
                debug!(angle, period, "measured {}", path.display());
                report.entries.push(PeriodEntry {
                    angle_degrees: angle,
                    period,
                    small_angle_period,
                });
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                report.skipped.push(SkippedFile {
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        measured = report.entries.len(),
        skipped = report.skipped.len(),
        "period report for {}",
        data_dir.display()
    );
    Ok(report)
}

/// Writes `report` as pretty JSON to `output_dir/name`.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `output_dir` is missing, or
/// [`Error::Io`] if the file cannot be written.
pub fn write_periods(report: &PeriodReport, output_dir: &Path, name: &str) -> Result<PathBuf, Error> {
    write_report(report, output_dir, name)
}

/// One lab angle set against the simulated period at the same angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub angle_degrees: i32,
    pub lab_mean: f64,
    /// The fitted curve evaluated at this angle.
    pub fitted: f64,
    pub simulated: Option<f64>,
    /// `simulated + b`, shifted by the fitted timing offset.
    pub adjusted: Option<f64>,
    /// `simulated - lab_mean`, when a simulated period exists.
    pub difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Period curve fitted to the lab means.
    pub fit: PeriodCurve,
    pub rows: Vec<ComparisonRow>,
    /// Mean of the available differences.
    pub mean_offset: Option<f64>,
}

/// Fits the period curve to `lab` and pairs every lab measurement with the
/// simulated period at its angle.
///
/// Lab angles without a simulated period keep a row with empty values.
///
/// # Errors
///
/// Returns [`Error::FitFailed`] if the lab measurements cannot be fitted.
pub fn compare(report: &PeriodReport, lab: &[LabMeasurement]) -> Result<Comparison, Error> {
    let fit = lab::fit_measurements(lab)?;
    debug!(m = fit.m, b = fit.b, "fitted lab period curve");

    let rows: Vec<ComparisonRow> = lab
        .iter()
        .map(|measurement| {
            let lab_mean = measurement.mean();
            let simulated = report.period_at(measurement.angle_degrees);
            ComparisonRow {
                angle_degrees: measurement.angle_degrees,
                lab_mean,
                fitted: fit.period_at(f64::from(measurement.angle_degrees).to_radians()),
                simulated,
                adjusted: simulated.map(|period| period + fit.b),
                difference: simulated.map(|period| period - lab_mean),
            }
        })
        .collect();

    let differences: Vec<f64> = rows.iter().filter_map(|row| row.difference).collect();
    let mean_offset = if differences.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = differences.len() as f64;
        Some(differences.iter().sum::<f64>() / count)
    };

    Ok(Comparison {
        fit,
        rows,
        mean_offset,
    })
}

/// Writes `comparison` as pretty JSON to `output_dir/name`.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `output_dir` is missing, or
/// [`Error::Io`] if the file cannot be written.
pub fn write_comparison(
    comparison: &Comparison,
    output_dir: &Path,
    name: &str,
) -> Result<PathBuf, Error> {
    write_report(comparison, output_dir, name)
}

fn write_report(value: &impl Serialize, output_dir: &Path, name: &str) -> Result<PathBuf, Error> {
    require_directory(output_dir)?;

    let path = output_dir.join(name);
    let bytes = serde_json::to_vec_pretty(value).map_err(|err| Error::io(&path, err.into()))?;
    write_atomic(&path, &bytes)?;

    info!("wrote {}", path.display());
    Ok(path)
}
