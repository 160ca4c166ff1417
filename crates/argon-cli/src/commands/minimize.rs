use crate::cli::MinimizeArgs;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use argon::engine::progress::ProgressReporter;
use argon::workflows::minimize;
use tracing::info;

pub fn run(args: MinimizeArgs) -> Result<()> {
    let mut config = SimulationConfig::load_or_default(args.config.as_deref())?.fire();
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    if let Some(eps_force) = args.eps_force {
        config.eps_force = eps_force;
    }
    info!(?config, "resolved FIRE configuration");

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let report = minimize::run(
        &args.input,
        &args.output,
        args.forcefield.as_deref(),
        &config,
        &reporter,
    )?;

    println!("Minimization summary");
    println!("  converged     : {}", report.converged);
    println!("  steps         : {}", report.steps);
    println!("  energy        : {:.6} kcal/mol", report.energy);
    println!("  RMS force     : {:.6} kcal/(mol·Å)", report.f_rms);
    println!("  final dt      : {:.4} fs", report.dt);
    println!("  final alpha   : {:.4}", report.alpha);
    println!("  output        : {}", args.output.display());

    Ok(())
}
