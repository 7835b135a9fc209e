//! QR factorization, delegated to `nalgebra::linalg::QR`.

use super::mat_from_col_major;
use crate::CpuScalar;
use unisolve_core::params::GeqrfParams;

/// Factor an m x n matrix, leaving the triangular factor R on and above
/// the diagonal.
///
/// The library consumes its reflector representation while forming R, so
/// this backend stores no reflectors: the strictly lower part of the
/// buffer is zeroed and `tau` is cleared. Routines that consume packed
/// reflectors are listed as unsupported in this backend's coverage table.
pub fn geqrf<T: CpuScalar>(p: GeqrfParams, a: &mut [T], tau: &mut [T]) -> i32 {
    let (m, n) = (p.m, p.n);
    let min_mn = p.min_mn();
    if min_mn == 0 {
        return 0;
    }

    let qr = nalgebra::linalg::QR::new(mat_from_col_major(a, m, n, p.lda));
    let r = qr.r();

    for j in 0..n {
        for i in 0..m {
            a[j * p.lda + i] = if i <= j && i < min_mn {
                r[(i, j)]
            } else {
                T::default()
            };
        }
    }
    for t in tau.iter_mut().take(min_mn) {
        *t = T::default();
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_matches_known_factorization() {
        let p = GeqrfParams { m: 3, n: 3, lda: 3 };
        // The classic Householder example; |R| = diag(14, 175, 35) up to
        // column signs.
        let mut a = vec![12.0, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0];
        let mut tau = vec![0.0; 3];
        assert_eq!(geqrf::<f64>(p, &mut a, &mut tau), 0);

        assert!((a[0].abs() - 14.0).abs() < 1e-10);
        assert!((a[4].abs() - 175.0).abs() < 1e-10);
        assert!((a[8].abs() - 35.0).abs() < 1e-10);
        // Strictly lower part cleared.
        assert_eq!(a[1], 0.0);
        assert_eq!(a[2], 0.0);
        assert_eq!(a[5], 0.0);
    }

    #[test]
    fn tall_matrix_r_is_upper_trapezoidal() {
        let p = GeqrfParams { m: 4, n: 2, lda: 4 };
        let mut a = vec![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0];
        let mut tau = vec![0.0; 2];
        assert_eq!(geqrf::<f64>(p, &mut a, &mut tau), 0);
        // Column norms are preserved by the orthogonal factor.
        let r00 = a[0];
        assert!((r00.abs() - 2.0).abs() < 1e-12);
        for i in 1..4 {
            assert_eq!(a[i], 0.0);
        }
    }
}
