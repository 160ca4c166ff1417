use crate::cli::AlignArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use argon::engine::progress::ProgressReporter;
use argon::workflows::align;

pub fn run(args: AlignArgs) -> Result<()> {
    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let report = align::run(
        &args.target,
        &args.reference,
        &args.output,
        args.frames,
        &reporter,
    )?;

    println!("Alignment summary");
    println!("  RMSD before   : {:.6} Å", report.rmsd_before);
    println!("  RMSD after    : {:.6} Å", report.rmsd_after);
    let r = report.rotation;
    println!("  rotation      : [{:8.5} {:8.5} {:8.5}]", r[(0, 0)], r[(0, 1)], r[(0, 2)]);
    println!("                  [{:8.5} {:8.5} {:8.5}]", r[(1, 0)], r[(1, 1)], r[(1, 2)]);
    println!("                  [{:8.5} {:8.5} {:8.5}]", r[(2, 0)], r[(2, 1)], r[(2, 2)]);
    println!("  output        : {}", args.output.display());

    Ok(())
}
