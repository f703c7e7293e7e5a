/// Singular values of a small linear block (one-sided Jacobi).
///
/// Only used to judge whether a matrix is numerically rank-deficient
/// before decomposing it, which is why it returns the values alone.
/// Columns are rotated pairwise until mutually orthogonal; the column
/// norms are then the singular values, with small ones resolved to
/// `f64::EPSILON` relative accuracy.

use glam::DVec3;

const MAX_SWEEPS: usize = 32;

/// Singular values of the matrix with the given columns, largest first.
///
/// 2D blocks are passed with `z == 0`.
pub(crate) fn singular_values<const N: usize>(columns: [DVec3; N]) -> [f64; N] {
    let mut a = columns;

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;

        for p in 0..N {
            for q in (p + 1)..N {
                let alpha = a[p].length_squared();
                let beta = a[q].length_squared();
                let gamma = a[p].dot(a[q]);

                if gamma == 0.0 || gamma.abs() <= f64::EPSILON * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                let ap = a[p];
                let aq = a[q];
                a[p] = ap * c - aq * s;
                a[q] = ap * s + aq * c;
            }
        }

        if !rotated {
            break;
        }
    }

    let mut sigma = a.map(|column| column.length());
    sigma.sort_by(|x, y| y.total_cmp(x));
    sigma
}

#[cfg(test)]
#[path = "singular_tests.rs"]
mod tests;
