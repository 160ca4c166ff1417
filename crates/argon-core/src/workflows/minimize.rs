use super::{WorkflowError, build_model, resolve_forcefield};
use crate::core::io::traits::StructureFile;
use crate::core::io::xyz::XyzFile;
use crate::engine::config::FireConfig;
use crate::engine::fire::{Fire, FireReport};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

/// Reads a structure, relaxes it with FIRE, and writes the result.
///
/// `forcefield` optionally points at a TOML parameter file; without it the
/// Lennard-Jones table is seeded from the element database and no bonded
/// terms are applied.
#[instrument(skip_all, name = "minimize_workflow")]
pub fn run(
    input: &Path,
    output: &Path,
    forcefield: Option<&Path>,
    config: &FireConfig,
    reporter: &ProgressReporter,
) -> Result<FireReport, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Minimizing structure",
    });

    let (mut state, metadata) = XyzFile::read_from_path(input)?;
    info!(atoms = state.len(), input = %input.display(), "structure loaded");

    let params = resolve_forcefield(forcefield, &metadata.species_symbols)?;
    let model = build_model(&params);

    let fire = Fire::new(*config)?;
    let report = fire.minimize(&mut state, &model, reporter)?;

    XyzFile::write_to_path(&state, &metadata, output)?;
    info!(
        output = %output.display(),
        converged = report.converged,
        energy = report.energy,
        "relaxed structure written"
    );

    reporter.report(Progress::PhaseFinish);
    Ok(report)
}
