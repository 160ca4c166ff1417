use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "argon - a small classical-mechanics engine: relax structures, run thermostatted dynamics, and superpose configurations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Relax a structure toward a local energy minimum with FIRE.
    Minimize(MinimizeArgs),
    /// Propagate a structure with Langevin stochastic dynamics.
    Dynamics(DynamicsArgs),
    /// Superpose a structure onto a reference with the Kabsch algorithm.
    Align(AlignArgs),
}

/// Arguments for the `minimize` subcommand.
#[derive(Args, Debug)]
pub struct MinimizeArgs {
    /// Path to the input structure file (XYZ).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the relaxed output structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Simulation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Force-field parameter file; defaults to element-database parameters.
    #[arg(long, value_name = "PATH")]
    pub forcefield: Option<PathBuf>,

    /// Override the iteration budget from the config file.
    #[arg(long, value_name = "INT")]
    pub max_steps: Option<u64>,

    /// Override the RMS-force convergence threshold.
    #[arg(long, value_name = "FLOAT")]
    pub eps_force: Option<f64>,
}

/// Arguments for the `dynamics` subcommand.
#[derive(Args, Debug)]
pub struct DynamicsArgs {
    /// Path to the input structure file (XYZ).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the final-frame output structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Simulation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Force-field parameter file; defaults to element-database parameters.
    #[arg(long, value_name = "PATH")]
    pub forcefield: Option<PathBuf>,

    /// Override the number of steps from the config file.
    #[arg(short = 'n', long, value_name = "INT")]
    pub steps: Option<u64>,

    /// Override the thermostat target temperature in K.
    #[arg(short, long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// RNG seed; identical seeds reproduce identical trajectories.
    #[arg(long, default_value_t = 2025, value_name = "INT")]
    pub seed: u64,

    /// Write per-interval telemetry samples to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub stats: Option<PathBuf>,
}

/// Arguments for the `align` subcommand.
#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Structure to be moved onto the reference (XYZ).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub target: PathBuf,

    /// Reference structure (XYZ).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub reference: PathBuf,

    /// Path for the aligned output structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Number of interpolated animation frames (0 aligns directly).
    #[arg(long, default_value_t = 0, value_name = "INT")]
    pub frames: usize,
}
