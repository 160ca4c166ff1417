use nalgebra::{Matrix3, Vector3};

const MAX_SWEEPS: usize = 50;
const OFF_DIAGONAL_EPS: f64 = 1e-15;
const RANK_EPS: f64 = 1e-12;

/// Result of a 3×3 singular value decomposition `A = U·Σ·Vᵗ`.
///
/// Singular values are sorted descending; `u` and `v` hold the corresponding
/// left/right singular vectors as columns. Both factors are orthogonal even
/// for rank-deficient input (missing columns are completed with cross
/// products rather than left undefined).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd3 {
    pub u: Matrix3<f64>,
    pub sigma: Vector3<f64>,
    pub v: Matrix3<f64>,
}

/// Decomposes an arbitrary 3×3 matrix via cyclic Jacobi iteration on `AᵗA`.
///
/// Accuracy is ≈1e-12 for well-conditioned input; no guarantee otherwise.
pub fn svd3(a: &Matrix3<f64>) -> Svd3 {
    let mut s = a.transpose() * a;
    let mut v = Matrix3::identity();

    for _ in 0..MAX_SWEEPS {
        let off = s[(0, 1)].abs() + s[(0, 2)].abs() + s[(1, 2)].abs();
        if off < OFF_DIAGONAL_EPS {
            break;
        }
        for &(p, q) in &[(0, 1), (0, 2), (1, 2)] {
            jacobi_rotate(&mut s, &mut v, p, q);
        }
    }

    // Eigenvalues of AᵗA are the squared singular values; roundoff can leave
    // them marginally negative.
    let mut order = [(s[(0, 0)], 0usize), (s[(1, 1)], 1), (s[(2, 2)], 2)];
    order.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let sigma = Vector3::new(
        order[0].0.max(0.0).sqrt(),
        order[1].0.max(0.0).sqrt(),
        order[2].0.max(0.0).sqrt(),
    );
    let v = Matrix3::from_columns(&[
        v.column(order[0].1).into_owned(),
        v.column(order[1].1).into_owned(),
        v.column(order[2].1).into_owned(),
    ]);

    let mut u_cols = [Vector3::zeros(); 3];
    let mut resolved = [false; 3];
    for i in 0..3 {
        if sigma[i] >= RANK_EPS {
            u_cols[i] = (a * v.column(i).into_owned()) / sigma[i];
            resolved[i] = true;
        }
    }
    complete_orthogonal_basis(&mut u_cols, &mut resolved);

    Svd3 {
        u: Matrix3::from_columns(&u_cols),
        sigma,
        v,
    }
}

/// Nearest (proper or improper) rotation to `a`, i.e. `U·Vᵗ` of its SVD.
pub fn polar_rotation(a: &Matrix3<f64>) -> Matrix3<f64> {
    let svd = svd3(a);
    svd.u * svd.v.transpose()
}

fn jacobi_rotate(s: &mut Matrix3<f64>, v: &mut Matrix3<f64>, p: usize, q: usize) {
    let s_pq = s[(p, q)];
    if s_pq == 0.0 {
        return;
    }

    let tau = (s[(q, q)] - s[(p, p)]) / (2.0 * s_pq);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    let sn = t * c;

    let mut g = Matrix3::identity();
    g[(p, p)] = c;
    g[(q, q)] = c;
    g[(p, q)] = sn;
    g[(q, p)] = -sn;

    *s = g.transpose() * *s * g;
    *v *= g;
}

/// Fills the unresolved columns of a partially-built orthonormal basis.
///
/// Columns lost to rank deficiency are reconstructed as cross products of
/// the surviving ones (cyclic order keeps the handedness of the resolved
/// columns). A fully degenerate input yields the identity basis.
fn complete_orthogonal_basis(cols: &mut [Vector3<f64>; 3], resolved: &mut [bool; 3]) {
    let n_resolved = resolved.iter().filter(|&&r| r).count();

    if n_resolved == 0 {
        *cols = [Vector3::x(), Vector3::y(), Vector3::z()];
        return;
    }

    if n_resolved == 1 {
        let a = resolved.iter().position(|&r| r).unwrap_or(0);
        let b = (a + 1) % 3;
        let axis = if cols[a].x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        cols[b] = (axis - cols[a] * cols[a].dot(&axis)).normalize();
        resolved[b] = true;
    }

    for k in 0..3 {
        if !resolved[k] {
            let i = (k + 1) % 3;
            let j = (k + 2) % 3;
            cols[k] = cols[i].cross(&cols[j]).normalize();
            resolved[k] = true;
        }
    }
}
