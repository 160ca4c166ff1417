use super::{WorkflowError, build_model, resolve_forcefield};
use crate::core::io::traits::StructureFile;
use crate::core::io::xyz::XyzFile;
use crate::engine::config::LangevinConfig;
use crate::engine::langevin::{Langevin, LangevinReport};
use crate::engine::progress::{Progress, ProgressReporter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{info, instrument};

/// Reads a structure, runs Langevin dynamics, and writes the final frame.
///
/// The RNG is seeded here and passed down explicitly: the same seed over
/// the same input reproduces the trajectory bit for bit.
#[instrument(skip_all, name = "dynamics_workflow")]
pub fn run(
    input: &Path,
    output: &Path,
    forcefield: Option<&Path>,
    config: &LangevinConfig,
    seed: u64,
    reporter: &ProgressReporter,
) -> Result<LangevinReport, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Running dynamics",
    });

    let (mut state, metadata) = XyzFile::read_from_path(input)?;
    info!(
        atoms = state.len(),
        seed,
        t_target = config.t_target,
        "structure loaded for dynamics"
    );

    let params = resolve_forcefield(forcefield, &metadata.species_symbols)?;
    let model = build_model(&params);

    let langevin = Langevin::new(*config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let report = langevin.run(&mut state, &model, &mut rng, reporter)?;

    // The final frame keeps its velocities: write the extended columns.
    let mut out_metadata = metadata;
    out_metadata.extended = true;
    XyzFile::write_to_path(&state, &out_metadata, output)?;
    info!(
        output = %output.display(),
        mean_temperature = report.mean_temperature,
        "final frame written"
    );

    reporter.report(Progress::PhaseFinish);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_gas(path: &Path) {
        let mut content = String::from("8\nargon gas\n");
        for i in 0..8 {
            let x = (i % 2) as f64 * 6.0;
            let y = ((i / 2) % 2) as f64 * 6.0;
            let z = (i / 4) as f64 * 6.0;
            content.push_str(&format!("Ar {x} {y} {z}\n"));
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn propagates_and_writes_velocities_in_the_final_frame() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("gas.xyz");
        let output = dir.path().join("final.xyz");
        write_gas(&input);

        let config = LangevinConfig {
            n_steps: 200,
            t_target: 120.0,
            print_freq: 50,
            ..Default::default()
        };
        let report = run(
            &input,
            &output,
            None,
            &config,
            9,
            &ProgressReporter::default(),
        )
        .unwrap();

        assert_eq!(report.steps, 200);
        assert_eq!(report.samples.len(), 4);
        assert!(report.mean_temperature > 0.0);

        let (final_frame, metadata) = XyzFile::read_from_path(&output).unwrap();
        assert!(metadata.extended);
        assert!(
            final_frame
                .velocities
                .iter()
                .any(|v| v.norm() > 0.0)
        );
    }

    #[test]
    fn identical_seeds_give_identical_final_frames() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("gas.xyz");
        write_gas(&input);
        let config = LangevinConfig {
            n_steps: 50,
            t_target: 120.0,
            print_freq: 0,
            ..Default::default()
        };

        let out_a = dir.path().join("a.xyz");
        let out_b = dir.path().join("b.xyz");
        run(&input, &out_a, None, &config, 77, &ProgressReporter::default()).unwrap();
        run(&input, &out_b, None, &config, 77, &ProgressReporter::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&out_a).unwrap(),
            fs::read_to_string(&out_b).unwrap()
        );
    }
}
