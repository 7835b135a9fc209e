//! Cholesky factorization, delegated to `nalgebra::linalg::Cholesky`.

use super::hermitian_from_triangle;
use crate::CpuScalar;
use nalgebra::ComplexField;
use unisolve_core::params::PotrfParams;
use unisolve_core::FillMode;

/// Factor a Hermitian positive-definite matrix in place.
///
/// On success the selected triangle holds the factor (A = L * L^H for the
/// lower mode, A = U^H * U for the upper mode) and 0 is returned. If the
/// matrix is not positive definite, the 1-based order of the first
/// non-positive-definite leading minor is returned and the buffer is left
/// unchanged.
pub fn potrf<T: CpuScalar>(p: PotrfParams, a: &mut [T]) -> i32 {
    let n = p.n;
    if n == 0 {
        return 0;
    }

    let full = hermitian_from_triangle(a, n, p.lda, p.uplo);
    match nalgebra::linalg::Cholesky::new(full) {
        Some(ch) => {
            let l = ch.l();
            match p.uplo {
                FillMode::Lower => {
                    for j in 0..n {
                        for i in j..n {
                            a[j * p.lda + i] = l[(i, j)];
                        }
                    }
                }
                FillMode::Upper => {
                    for j in 0..n {
                        for i in 0..=j {
                            a[j * p.lda + i] = l[(j, i)].conjugate();
                        }
                    }
                }
            }
            0
        }
        None => potrf_failing_minor(a, n, p.lda, p.uplo),
    }
}

/// 1-based order of the smallest leading minor that is not positive
/// definite, probed with the same library the factorization uses.
pub(crate) fn potrf_failing_minor<T: CpuScalar>(a: &[T], n: usize, lda: usize, uplo: FillMode) -> i32 {
    for k in 1..=n {
        let sub = hermitian_from_triangle(a, k, lda, uplo);
        if nalgebra::linalg::Cholesky::new(sub).is_none() {
            return k as i32;
        }
    }
    n as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_spd_matrix_lower() {
        let p = PotrfParams {
            uplo: FillMode::Lower,
            n: 2,
            lda: 2,
        };
        // A = [[4, 2], [2, 3]] -> L = [[2, 0], [1, sqrt(2)]].
        let mut a = vec![4.0, 2.0, 2.0, 3.0];
        assert_eq!(potrf::<f64>(p, &mut a), 0);
        assert!((a[0] - 2.0).abs() < 1e-12);
        assert!((a[1] - 1.0).abs() < 1e-12);
        assert!((a[3] - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn upper_mode_is_adjoint_of_lower() {
        let lower = PotrfParams {
            uplo: FillMode::Lower,
            n: 2,
            lda: 2,
        };
        let upper = PotrfParams {
            uplo: FillMode::Upper,
            ..lower
        };
        let mut al = vec![4.0, 2.0, 2.0, 3.0];
        let mut au = al.clone();
        assert_eq!(potrf::<f64>(lower, &mut al), 0);
        assert_eq!(potrf::<f64>(upper, &mut au), 0);
        // U[(0, 1)] == L[(1, 0)] for a real matrix.
        assert!((au[2] - al[1]).abs() < 1e-12);
    }

    #[test]
    fn indefinite_matrix_reports_leading_minor() {
        let p = PotrfParams {
            uplo: FillMode::Lower,
            n: 3,
            lda: 3,
        };
        // Leading 1x1 and 2x2 minors are fine; the full matrix is not PD.
        let mut a = vec![4.0, 1.0, 10.0, 1.0, 3.0, 1.0, 10.0, 1.0, 1.0];
        let before = a.clone();
        let info = potrf::<f64>(p, &mut a);
        assert_eq!(info, 3);
        // Buffer untouched on failure.
        assert_eq!(a, before);
    }

    #[test]
    fn first_element_nonpositive() {
        let p = PotrfParams {
            uplo: FillMode::Upper,
            n: 2,
            lda: 2,
        };
        let mut a = vec![-1.0, 0.0, 0.0, 1.0];
        assert_eq!(potrf::<f64>(p, &mut a), 1);
    }
}
