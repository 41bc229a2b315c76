//! Optional TOML configuration for sweeps.
//!
//! Every key is optional. Missing keys fall back to the values of the
//! reference lab setup:
//!
//! ```toml
//! [pendulum]
//! length = 0.1476     # m
//! gravity = 9.81      # m/s^2
//! damping = 0.0       # 1/s
//!
//! [simulation]
//! duration = 3.0      # s
//! time_step = 0.0005  # s
//! scheme = "rk4"      # "rk4" | "heun" | "forward-euler"
//! ```

use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use swing_pendulum::{PendulumParameters, Scheme, SimulationConfig};
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Frequency, Length, Time},
    frequency::hertz,
    length::meter,
    time::second,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub pendulum: PendulumSection,
    pub simulation: SimulationSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PendulumSection {
    pub length: f64,
    pub gravity: f64,
    pub damping: f64,
}

impl Default for PendulumSection {
    fn default() -> Self {
        Self {
            length: 0.1476,
            gravity: 9.81,
            damping: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub duration: f64,
    pub time_step: f64,
    pub scheme: Scheme,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            duration: 3.0,
            time_step: 0.0005,
            scheme: Scheme::Rk4,
        }
    }
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        text.parse::<Self>()
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Validated physical parameters.
    pub fn parameters(&self) -> Result<PendulumParameters, swing_pendulum::Error> {
        let PendulumSection {
            length,
            gravity,
            damping,
        } = self.pendulum;

        PendulumParameters::new(
            Length::new::<meter>(length),
            Acceleration::new::<meter_per_second_squared>(gravity),
        )?
        .with_damping(Frequency::new::<hertz>(damping))
    }

    /// Validated run settings.
    pub fn simulation(&self) -> Result<SimulationConfig, swing_pendulum::Error> {
        SimulationConfig::new(
            Time::new::<second>(self.simulation.duration),
            Time::new::<second>(self.simulation.time_step),
            self.simulation.scheme,
        )
    }
}

impl std::str::FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = "".parse().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.pendulum.length, 0.1476);
        assert_eq!(config.simulation.scheme, Scheme::Rk4);
        assert_eq!(config.simulation().unwrap().steps(), 6000);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = r#"
            [pendulum]
            length = 1.0

            [simulation]
            scheme = "forward-euler"
            time_step = 0.001
        "#
        .parse()
        .unwrap();

        assert_eq!(config.pendulum.length, 1.0);
        assert_eq!(config.pendulum.gravity, 9.81);
        assert_eq!(config.simulation.duration, 3.0);
        assert_eq!(config.simulation.scheme, Scheme::ForwardEuler);

        let parameters = config.parameters().unwrap();
        assert_eq!(parameters.length(), 1.0);
        assert_eq!(config.simulation().unwrap().steps(), 3000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!("[pendulum]\nmass = 2.0\n".parse::<Config>().is_err());
        assert!("[solver]\nscheme = \"rk4\"\n".parse::<Config>().is_err());
        assert!("[simulation]\nscheme = \"rk45\"\n".parse::<Config>().is_err());
    }

    #[test]
    fn non_physical_values_fail_validation() {
        let config: Config = "[pendulum]\nlength = -0.5\n".parse().unwrap();
        assert!(matches!(
            config.parameters(),
            Err(swing_pendulum::Error::InvalidParameter { name: "length", .. })
        ));

        let config: Config = "[simulation]\ntime_step = 0.0\n".parse().unwrap();
        assert!(config.simulation().is_err());
    }

    #[test]
    fn damping_is_carried_through() {
        let config: Config = "[pendulum]\ndamping = 0.25\n".parse().unwrap();
        assert_eq!(config.parameters().unwrap().damping(), 0.25);
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nduration = 1.5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.simulation.duration, 1.5);

        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("swing.toml");

        let err = Config::load(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("swing.toml"));
    }
}
