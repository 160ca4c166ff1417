use crate::core::math::svd3;
use crate::core::models::state::AtomicState;
use nalgebra::{Matrix3, Vector3};
use tracing::{debug, instrument};

/// Outcome of a rigid superposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentReport {
    /// The applied rotation (identity for the degenerate no-op cases).
    pub rotation: Matrix3<f64>,
    pub rmsd_before: f64,
    pub rmsd_after: f64,
    /// Center of mass of the target before alignment.
    pub target_com: Vector3<f64>,
    /// Center of mass of the reference; the aligned target is translated
    /// onto it (camera consumers re-center on this point).
    pub reference_com: Vector3<f64>,
}

/// One interpolation frame handed to the `animated_align` callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignFrame {
    /// Progress through the animation in (0, 1].
    pub fraction: f64,
    /// RMSD of the current interpolated configuration against the reference.
    pub rmsd: f64,
}

/// Per-frame observer: progress fraction, current RMSD, and the current
/// interpolated state.
pub type FrameCallback<'a> = dyn FnMut(AlignFrame, &AtomicState) + 'a;

/// Positional root-mean-square deviation between two equally-sized states.
pub fn rmsd(a: &AtomicState, b: &AtomicState) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return f64::NAN;
    }
    let sum_sq: f64 = a
        .positions
        .iter()
        .zip(&b.positions)
        .map(|(p, q)| (p - q).norm_squared())
        .sum();
    (sum_sq / a.len() as f64).sqrt()
}

/// Superposes `target` onto `reference` in place, minimizing RMSD.
///
/// Positions and velocities are rotated by the Kabsch-optimal proper
/// rotation and the target is translated onto the reference center of
/// mass. Degenerate inputs (fewer than two atoms, or mismatched counts)
/// leave the target untouched and report the identity rotation.
#[instrument(skip_all, name = "kabsch_align")]
pub fn kabsch_align(target: &mut AtomicState, reference: &AtomicState) -> AlignmentReport {
    let rmsd_before = rmsd(target, reference);
    let Some((rotation, target_com, reference_com)) = optimal_rotation(target, reference) else {
        debug!("degenerate alignment input: returning identity");
        return AlignmentReport {
            rotation: Matrix3::identity(),
            rmsd_before,
            rmsd_after: rmsd_before,
            target_com: target.center_of_mass(),
            reference_com: reference.center_of_mass(),
        };
    };

    apply_transform(target, &rotation, &target_com, &reference_com);
    let rmsd_after = rmsd(target, reference);
    debug!(rmsd_before, rmsd_after, "alignment applied");

    AlignmentReport {
        rotation,
        rmsd_before,
        rmsd_after,
        target_com,
        reference_com,
    }
}

/// Superposition that additionally emits `frames` interpolated
/// configurations between the identity and the final rotation.
///
/// The interpolation is linear in the raw matrix entries, so intermediate
/// frames are generally not rigid rotations; they shear slightly. The
/// final frame is the exact Kabsch result. The callback receives every
/// frame in order; with `frames == 0` this degenerates to
/// [`kabsch_align`].
#[instrument(skip_all, name = "animated_align")]
pub fn animated_align(
    target: &mut AtomicState,
    reference: &AtomicState,
    frames: usize,
    mut on_frame: Option<&mut FrameCallback<'_>>,
) -> AlignmentReport {
    let rmsd_before = rmsd(target, reference);
    let Some((rotation, target_com, reference_com)) = optimal_rotation(target, reference) else {
        return AlignmentReport {
            rotation: Matrix3::identity(),
            rmsd_before,
            rmsd_after: rmsd_before,
            target_com: target.center_of_mass(),
            reference_com: reference.center_of_mass(),
        };
    };

    if frames == 0 {
        apply_transform(target, &rotation, &target_com, &reference_com);
        let rmsd_after = rmsd(target, reference);
        return AlignmentReport {
            rotation,
            rmsd_before,
            rmsd_after,
            target_com,
            reference_com,
        };
    }

    let centered: Vec<Vector3<f64>> = target.positions.iter().map(|r| r - target_com).collect();
    let start_velocities = target.velocities.clone();

    for frame in 1..=frames {
        let fraction = frame as f64 / frames as f64;
        let blended = Matrix3::identity() * (1.0 - fraction) + rotation * fraction;
        for (idx, c) in centered.iter().enumerate() {
            target.positions[idx] = reference_com + blended * c;
        }
        for (idx, v) in start_velocities.iter().enumerate() {
            target.velocities[idx] = blended * v;
        }
        let current = rmsd(target, reference);
        if let Some(cb) = on_frame.as_deref_mut() {
            cb(
                AlignFrame {
                    fraction,
                    rmsd: current,
                },
                target,
            );
        }
    }

    let rmsd_after = rmsd(target, reference);
    AlignmentReport {
        rotation,
        rmsd_before,
        rmsd_after,
        target_com,
        reference_com,
    }
}

/// Kabsch-optimal proper rotation, or `None` for degenerate input.
fn optimal_rotation(
    target: &AtomicState,
    reference: &AtomicState,
) -> Option<(Matrix3<f64>, Vector3<f64>, Vector3<f64>)> {
    if target.len() < 2 || target.len() != reference.len() {
        return None;
    }

    let target_com = target.center_of_mass();
    let reference_com = reference.center_of_mass();

    let mut covariance = Matrix3::zeros();
    for (t, r) in target.positions.iter().zip(&reference.positions) {
        covariance += (t - target_com) * (r - reference_com).transpose();
    }

    let svd = svd3(&covariance);
    let mut v = svd.v;
    let mut rotation = v * svd.u.transpose();

    // Chirality correction: force a proper rotation by flipping the
    // singular vector of the smallest singular value.
    if rotation.determinant() < 0.0 {
        for row in 0..3 {
            v[(row, 2)] = -v[(row, 2)];
        }
        rotation = v * svd.u.transpose();
    }

    Some((rotation, target_com, reference_com))
}

fn apply_transform(
    state: &mut AtomicState,
    rotation: &Matrix3<f64>,
    from_com: &Vector3<f64>,
    to_com: &Vector3<f64>,
) {
    for r in &mut state.positions {
        *r = to_com + rotation * (*r - from_com);
    }
    for v in &mut state.velocities {
        *v = rotation * *v;
    }
}
