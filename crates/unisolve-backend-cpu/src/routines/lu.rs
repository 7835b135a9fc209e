//! LU factorization and solve, delegated to `nalgebra::linalg::LU`.

use super::{mat_from_col_major, mat_to_col_major};
use crate::CpuScalar;
use nalgebra::{DMatrix, DVector};
use unisolve_core::params::{GetrfParams, GetrsParams};
use unisolve_core::Op;

/// Factor an m x n matrix in place into P * A = L * U.
///
/// On return the buffer holds U on and above the diagonal and the unit
/// lower factor's multipliers below it. `ipiv[k]` is the 1-based row that
/// row k was interchanged with. Returns the 1-based index of the first
/// zero pivot, or 0.
pub fn getrf<T: CpuScalar>(p: GetrfParams, a: &mut [T], ipiv: &mut [i32]) -> i32 {
    let (m, n) = (p.m, p.n);
    let min_mn = p.min_mn();
    if min_mn == 0 {
        return 0;
    }

    let lu = nalgebra::linalg::LU::new(mat_from_col_major(a, m, n, p.lda));
    let l = lu.l();
    let u = lu.u();

    // Pack the two factors back into the caller's buffer. For i > j the
    // column index stays below min(m, n), and for i <= j the row index
    // does, so both lookups are in range.
    for j in 0..n {
        for i in 0..m {
            a[j * p.lda + i] = if i > j { l[(i, j)] } else { u[(i, j)] };
        }
    }

    // Recover the row order chosen by the factorization, then express it
    // as the sequential interchanges the packed format promises.
    let mut order = DVector::from_iterator(m, 0..m);
    lu.p().permute_rows(&mut order);
    let swaps = mapping_to_swaps(order.as_slice(), min_mn);
    for (k, s) in swaps.iter().enumerate() {
        ipiv[k] = (*s + 1) as i32;
    }

    for k in 0..min_mn {
        if u[(k, k)] == T::default() {
            return (k + 1) as i32;
        }
    }
    0
}

/// Convert a row mapping (`perm[i]` = original row now in slot i) into the
/// sequence of pairwise interchanges that realizes it.
fn mapping_to_swaps(perm: &[usize], count: usize) -> Vec<usize> {
    let m = perm.len();
    let mut cur: Vec<usize> = (0..m).collect();
    let mut pos: Vec<usize> = (0..m).collect();
    let mut swaps = Vec::with_capacity(count);
    for (k, &target) in perm.iter().enumerate().take(count) {
        let s = pos[target];
        swaps.push(s);
        if s != k {
            let displaced = cur[k];
            cur.swap(k, s);
            pos[target] = k;
            pos[displaced] = s;
        }
    }
    swaps
}

/// Solve op(A) X = B from the packed factorization produced by [`getrf`].
pub fn getrs<T: CpuScalar>(p: GetrsParams, a: &[T], ipiv: &[i32], b: &mut [T]) -> i32 {
    let n = p.n;
    if n == 0 || p.nrhs == 0 {
        return 0;
    }

    let packed = mat_from_col_major(a, n, n, p.lda);
    let l = DMatrix::from_fn(n, n, |i, j| {
        if i > j {
            packed[(i, j)]
        } else if i == j {
            nalgebra::one::<T>()
        } else {
            T::default()
        }
    });
    let u = DMatrix::from_fn(n, n, |i, j| if i <= j { packed[(i, j)] } else { T::default() });
    let mut bm = mat_from_col_major(b, n, p.nrhs, p.ldb);

    let solved = match p.trans {
        Op::None => {
            // L U X = P B
            for k in 0..n {
                let s = (ipiv[k] - 1) as usize;
                if s != k {
                    bm.swap_rows(k, s);
                }
            }
            l.solve_lower_triangular(&bm)
                .and_then(|y| u.solve_upper_triangular(&y))
        }
        Op::Transpose => solve_transposed(&l, &u, &bm, ipiv, false),
        Op::ConjTranspose => solve_transposed(&l, &u, &bm, ipiv, true),
    };

    // A singular factor leaves the right-hand side untouched; the caller
    // already learned about it from the factorization's completion slot.
    if let Some(x) = solved {
        mat_to_col_major(&x, b, p.ldb);
    }
    0
}

fn solve_transposed<T: CpuScalar>(
    l: &DMatrix<T>,
    u: &DMatrix<T>,
    b: &DMatrix<T>,
    ipiv: &[i32],
    conjugate: bool,
) -> Option<DMatrix<T>> {
    // op(A) = op(U) op(L) P, so solve with the transposed factors first
    // and undo the interchanges last, in reverse order.
    let (ut, lt) = if conjugate {
        (u.adjoint(), l.adjoint())
    } else {
        (u.transpose(), l.transpose())
    };
    let y = ut.solve_lower_triangular(b)?;
    let mut x = lt.solve_upper_triangular(&y)?;
    for k in (0..l.nrows()).rev() {
        let s = (ipiv[k] - 1) as usize;
        if s != k {
            x.swap_rows(k, s);
        }
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_swaps(rows: &mut [usize], ipiv: &[i32]) {
        for (k, &p) in ipiv.iter().enumerate() {
            rows.swap(k, (p - 1) as usize);
        }
    }

    #[test]
    fn mapping_round_trips_through_swaps() {
        let perm = vec![2usize, 0, 3, 1];
        let swaps = mapping_to_swaps(&perm, 4);
        let mut rows: Vec<usize> = (0..4).collect();
        let ipiv: Vec<i32> = swaps.iter().map(|&s| (s + 1) as i32).collect();
        apply_swaps(&mut rows, &ipiv);
        assert_eq!(rows, perm);
    }

    #[test]
    fn factor_reconstructs_permuted_input() {
        let p = GetrfParams { m: 3, n: 3, lda: 3 };
        // Column-major [[12,-51,4],[6,167,-68],[-4,24,-41]].
        let mut a = vec![12.0, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0];
        let orig = a.clone();
        let mut ipiv = vec![0i32; 3];
        let info = getrf::<f64>(p, &mut a, &mut ipiv);
        assert_eq!(info, 0);

        // Rebuild L and U and check L * U == P * A.
        let mut rows: Vec<usize> = (0..3).collect();
        apply_swaps(&mut rows, &ipiv);
        for i in 0..3 {
            for j in 0..3 {
                let mut lu = 0.0;
                for k in 0..3 {
                    let lik = match k.cmp(&i) {
                        std::cmp::Ordering::Less => a[k * 3 + i],
                        std::cmp::Ordering::Equal => 1.0,
                        std::cmp::Ordering::Greater => 0.0,
                    };
                    let ukj = if k <= j { a[j * 3 + k] } else { 0.0 };
                    lu += lik * ukj;
                }
                let pa = orig[j * 3 + rows[i]];
                assert!((lu - pa).abs() < 1e-10, "mismatch at ({i}, {j})");
            }
        }
    }

    #[test]
    fn singular_matrix_reports_pivot_index() {
        let p = GetrfParams { m: 2, n: 2, lda: 2 };
        // Two identical rows.
        let mut a = vec![1.0, 1.0, 2.0, 2.0];
        let mut ipiv = vec![0i32; 2];
        let info = getrf::<f64>(p, &mut a, &mut ipiv);
        assert_eq!(info, 2);
    }

    #[test]
    fn solve_after_factor() {
        let pf = GetrfParams { m: 2, n: 2, lda: 2 };
        // A = [[2, 1], [1, 3]], b = [5, 5] -> x = [2, 1].
        let mut a = vec![2.0, 1.0, 1.0, 3.0];
        let mut ipiv = vec![0i32; 2];
        assert_eq!(getrf::<f64>(pf, &mut a, &mut ipiv), 0);

        let ps = GetrsParams {
            trans: Op::None,
            n: 2,
            nrhs: 1,
            lda: 2,
            ldb: 2,
        };
        let mut b = vec![5.0, 5.0];
        assert_eq!(getrs::<f64>(ps, &a, &ipiv, &mut b), 0);
        assert!((b[0] - 2.0).abs() < 1e-12);
        assert!((b[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn transposed_solve_matches_direct_factorization() {
        let pf = GetrfParams { m: 3, n: 3, lda: 3 };
        let a0 = vec![4.0, 1.0, 2.0, 1.0, 5.0, 3.0, 2.0, 3.0, 6.0];
        let mut a = a0.clone();
        let mut ipiv = vec![0i32; 3];
        assert_eq!(getrf::<f64>(pf, &mut a, &mut ipiv), 0);

        let ps = GetrsParams {
            trans: Op::Transpose,
            n: 3,
            nrhs: 1,
            lda: 3,
            ldb: 3,
        };
        let mut b = vec![1.0, 2.0, 3.0];
        assert_eq!(getrs::<f64>(ps, &a, &ipiv, &mut b), 0);

        // Row j of A^T is column j of A: sum_i A[i][j] * x[i] = rhs[j].
        for j in 0..3 {
            let mut acc = 0.0;
            for i in 0..3 {
                acc += a0[j * 3 + i] * b[i];
            }
            let rhs = [1.0, 2.0, 3.0][j];
            assert!((acc - rhs).abs() < 1e-10);
        }
    }
}
