use crate::cli::DynamicsArgs;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use argon::engine::langevin::LangevinReport;
use argon::engine::progress::ProgressReporter;
use argon::workflows::dynamics;
use std::path::Path;
use tracing::info;

pub fn run(args: DynamicsArgs) -> Result<()> {
    let mut config = SimulationConfig::load_or_default(args.config.as_deref())?.langevin();
    if let Some(steps) = args.steps {
        config.n_steps = steps;
    }
    if let Some(temperature) = args.temperature {
        config.t_target = temperature;
    }
    info!(?config, seed = args.seed, "resolved Langevin configuration");

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let report = dynamics::run(
        &args.input,
        &args.output,
        args.forcefield.as_deref(),
        &config,
        args.seed,
        &reporter,
    )?;

    if let Some(stats_path) = &args.stats {
        write_stats_csv(stats_path, &report)?;
        println!("Telemetry written to {}", stats_path.display());
    }

    println!("Dynamics summary ({} steps)", report.steps);
    println!(
        "  temperature   : {:.2} ± {:.2} K (target {:.2} K)",
        report.mean_temperature, report.temperature_std_dev, config.t_target
    );
    println!("  mean kinetic  : {:.4} kcal/mol", report.mean_kinetic);
    println!("  mean potential: {:.4} kcal/mol", report.mean_potential);
    println!("  mean total    : {:.4} kcal/mol", report.mean_total);
    println!("  final T       : {:.2} K", report.final_temperature);
    println!("  output        : {}", args.output.display());

    Ok(())
}

fn write_stats_csv(path: &Path, report: &LangevinReport) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["step", "temperature", "kinetic", "potential", "total"])?;
    for sample in &report.samples {
        writer.write_record([
            sample.step.to_string(),
            format!("{:.6}", sample.temperature),
            format!("{:.6}", sample.kinetic),
            format!("{:.6}", sample.potential),
            format!("{:.6}", sample.total),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
