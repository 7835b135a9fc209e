//! Symmetric/Hermitian eigen-decompositions, delegated to
//! `nalgebra::linalg::SymmetricEigen` with the standard reduction for the
//! generalized problem.

use super::{hermitian_from_triangle, mat_to_col_major};
use crate::CpuScalar;
use nalgebra::linalg::{Cholesky, SymmetricEigen};
use nalgebra::{ComplexField, DMatrix};
use unisolve_core::params::{SyevdParams, SygvdParams};
use unisolve_core::{EigMode, EigType, Scalar};

/// Eigen-decomposition of a Hermitian matrix.
///
/// Eigenvalues land in `d` in ascending order; with the vector mode the
/// matching eigenvectors overwrite the columns of `a`.
pub fn syevd<T: CpuScalar>(p: SyevdParams, a: &mut [T], d: &mut [<T as Scalar>::Real]) -> i32 {
    let n = p.n;
    if n == 0 {
        return 0;
    }

    let eig = SymmetricEigen::new(hermitian_from_triangle(a, n, p.lda, p.uplo));
    store_sorted(&eig, p.jobz, a, p.lda, d);
    0
}

/// Generalized Hermitian-definite eigen-decomposition.
///
/// Reduces A x = lambda B x (and the two related forms) to a standard
/// problem through the Cholesky factor of B, then transforms the vectors
/// back. If B is not positive definite the completion code is n plus the
/// 1-based order of its failing leading minor.
pub fn sygvd<T: CpuScalar>(
    p: SygvdParams,
    a: &mut [T],
    b: &mut [T],
    d: &mut [<T as Scalar>::Real],
) -> i32 {
    let n = p.n;
    if n == 0 {
        return 0;
    }

    let bfull = hermitian_from_triangle(b, n, p.ldb, p.uplo);
    let ch = match Cholesky::new(bfull) {
        Some(ch) => ch,
        None => {
            return n as i32 + super::cholesky::potrf_failing_minor(b, n, p.ldb, p.uplo);
        }
    };
    let l = ch.l();
    let afull = hermitian_from_triangle(a, n, p.lda, p.uplo);

    // Reduce to the standard problem. A successful factorization has a
    // strictly positive diagonal, so the triangular solves cannot fail;
    // the fallback verdict is unreachable in practice.
    let std_form = match p.itype {
        EigType::Type1 => {
            // C = L^-1 A L^-H
            let t = match l.solve_lower_triangular(&afull) {
                Some(t) => t,
                None => return (n + 1) as i32,
            };
            // C = T L^-H, computed as (L^-1 T^H)^H.
            match l.solve_lower_triangular(&t.adjoint()) {
                Some(t2) => t2.adjoint(),
                None => return (n + 1) as i32,
            }
        }
        // C = L^H A L for both remaining forms.
        EigType::Type2 | EigType::Type3 => l.adjoint() * &afull * &l,
    };

    let eig = SymmetricEigen::new(std_form);
    let order = ascending_order(&eig);
    for (k, &src) in order.iter().enumerate() {
        d[k] = eig.eigenvalues[src];
    }

    if p.jobz == EigMode::Vectors {
        let mut y = DMatrix::from_fn(n, n, |i, k| eig.eigenvectors[(i, order[k])]);
        // Back-transform: x = L^-H y for types 1 and 2, x = L y for type 3.
        match p.itype {
            EigType::Type1 | EigType::Type2 => {
                let x = match l.adjoint().solve_upper_triangular(&y) {
                    Some(x) => x,
                    None => return (n + 1) as i32,
                };
                y = x;
            }
            EigType::Type3 => {
                y = &l * y;
            }
        }
        mat_to_col_major(&y, a, p.lda);
    }

    // The lower triangle of B's factor is what a caller reusing B expects.
    for j in 0..n {
        match p.uplo {
            unisolve_core::FillMode::Lower => {
                for i in j..n {
                    b[j * p.ldb + i] = l[(i, j)];
                }
            }
            unisolve_core::FillMode::Upper => {
                for i in 0..=j {
                    b[j * p.ldb + i] = l[(j, i)].conjugate();
                }
            }
        }
    }
    0
}

fn store_sorted<T: CpuScalar>(
    eig: &SymmetricEigen<T, nalgebra::Dyn>,
    jobz: EigMode,
    a: &mut [T],
    lda: usize,
    d: &mut [<T as Scalar>::Real],
) {
    let n = eig.eigenvalues.len();
    let order = ascending_order(eig);
    for (k, &src) in order.iter().enumerate() {
        d[k] = eig.eigenvalues[src];
    }
    if jobz == EigMode::Vectors {
        for (k, &src) in order.iter().enumerate() {
            for i in 0..n {
                a[k * lda + i] = eig.eigenvectors[(i, src)];
            }
        }
    }
}

fn ascending_order<T: CpuScalar>(eig: &SymmetricEigen<T, nalgebra::Dyn>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    order.sort_by(|&x, &y| {
        eig.eigenvalues[x]
            .partial_cmp(&eig.eigenvalues[y])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisolve_core::FillMode;

    #[test]
    fn eigenvalues_of_diagonal_matrix_ascend() {
        let p = SyevdParams {
            jobz: EigMode::NoVectors,
            uplo: FillMode::Lower,
            n: 3,
            lda: 3,
        };
        let mut a = vec![3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0];
        let mut d = vec![0.0; 3];
        assert_eq!(syevd::<f64>(p, &mut a, &mut d), 0);
        assert!((d[0] - 1.0).abs() < 1e-12);
        assert!((d[1] - 2.0).abs() < 1e-12);
        assert!((d[2] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn eigenvectors_satisfy_definition() {
        let p = SyevdParams {
            jobz: EigMode::Vectors,
            uplo: FillMode::Upper,
            n: 2,
            lda: 2,
        };
        // A = [[2, 1], [1, 2]]: eigenvalues 1 and 3.
        let mut a = vec![2.0, 0.0, 1.0, 2.0];
        let mut d = vec![0.0; 2];
        assert_eq!(syevd::<f64>(p, &mut a, &mut d), 0);
        assert!((d[0] - 1.0).abs() < 1e-12);
        assert!((d[1] - 3.0).abs() < 1e-12);

        let full = [[2.0, 1.0], [1.0, 2.0]];
        for k in 0..2 {
            let v = [a[k * 2], a[k * 2 + 1]];
            for i in 0..2 {
                let av = full[i][0] * v[0] + full[i][1] * v[1];
                assert!((av - d[k] * v[i]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn generalized_type1_with_identity_b_matches_standard() {
        let p = SygvdParams {
            itype: EigType::Type1,
            jobz: EigMode::NoVectors,
            uplo: FillMode::Lower,
            n: 2,
            lda: 2,
            ldb: 2,
        };
        let mut a = vec![2.0, 1.0, 1.0, 2.0];
        let mut b = vec![1.0, 0.0, 0.0, 1.0];
        let mut d = vec![0.0; 2];
        assert_eq!(sygvd::<f64>(p, &mut a, &mut b, &mut d), 0);
        assert!((d[0] - 1.0).abs() < 1e-10);
        assert!((d[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn generalized_reports_indefinite_b_past_n() {
        let p = SygvdParams {
            itype: EigType::Type1,
            jobz: EigMode::NoVectors,
            uplo: FillMode::Lower,
            n: 2,
            lda: 2,
            ldb: 2,
        };
        let mut a = vec![2.0, 0.0, 0.0, 2.0];
        let mut b = vec![-1.0, 0.0, 0.0, 1.0];
        let mut d = vec![0.0; 2];
        let info = sygvd::<f64>(p, &mut a, &mut b, &mut d);
        assert_eq!(info, 3); // n + first failing minor = 2 + 1
    }
}
