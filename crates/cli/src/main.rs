//! `swing`: pendulum angle sweeps and period reports.
//!
//! ```text
//! swing sweep 5 75 10 data/ --config swing.toml
//! swing periods data/ reports/
//! swing compare data/ reports/
//! swing inspect data/35_degrees.json
//! ```

mod commands;
mod config;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use swing_pendulum::report;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "swing", version)]
#[command(about = "Simulate a nonlinear pendulum across release angles")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate each release angle and write one trajectory file per angle
    Sweep {
        /// First release angle in degrees
        #[arg(allow_negative_numbers = true)]
        initial: i32,

        /// Last release angle in degrees, included only when reached exactly
        #[arg(value_name = "FINAL", allow_negative_numbers = true)]
        final_angle: i32,

        /// Step between angles in degrees
        increment: i32,

        /// Existing directory that receives the trajectory files
        data_dir: PathBuf,

        /// TOML file with [pendulum] and [simulation] settings
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Extract the period of every trajectory file in a directory
    Periods {
        data_dir: PathBuf,

        /// Existing directory that receives the report
        output_dir: PathBuf,

        #[arg(long, default_value = report::PERIODS_FILE)]
        name: String,
    },

    /// Compare simulated periods with the lab measurements
    Compare {
        data_dir: PathBuf,

        /// Existing directory that receives the report
        output_dir: PathBuf,

        #[arg(long, default_value = report::COMPARISON_FILE)]
        name: String,
    },

    /// Summarize a single trajectory file
    Inspect { file: PathBuf },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "swing=debug" } else { "swing=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Sweep {
            initial,
            final_angle,
            increment,
            data_dir,
            config,
        } => {
            let written = commands::sweep(
                initial,
                final_angle,
                increment,
                &data_dir,
                config.as_deref(),
            )?;
            info!("wrote {} trajectory files", written.len());
            Ok(())
        }
        Command::Periods {
            data_dir,
            output_dir,
            name,
        } => commands::periods(&data_dir, &output_dir, &name),
        Command::Compare {
            data_dir,
            output_dir,
            name,
        } => commands::compare(&data_dir, &output_dir, &name),
        Command::Inspect { file } => commands::inspect(&file),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sweep_accepts_negative_angles() {
        let cli = Cli::try_parse_from(["swing", "sweep", "-30", "-10", "10", "data"]).unwrap();

        let Command::Sweep {
            initial,
            final_angle,
            increment,
            config,
            ..
        } = cli.command
        else {
            panic!("expected sweep");
        };
        assert_eq!((initial, final_angle, increment), (-30, -10, 10));
        assert!(config.is_none());
    }

    #[test]
    fn report_names_default() {
        let cli = Cli::try_parse_from(["swing", "-v", "periods", "data", "out"]).unwrap();

        assert!(cli.verbose);
        let Command::Periods { name, .. } = cli.command else {
            panic!("expected periods");
        };
        assert_eq!(name, "periods.json");
    }

    #[test]
    fn sweep_requires_all_positionals() {
        assert!(Cli::try_parse_from(["swing", "sweep", "5", "75", "10"]).is_err());
    }
}
