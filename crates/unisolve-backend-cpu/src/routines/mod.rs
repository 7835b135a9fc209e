//! Synchronous slice-level adapters between the protocol's column-major
//! buffers and `nalgebra`'s decompositions.
//!
//! Each adapter takes validated parameters plus host slices, runs on the
//! queue's worker thread, and returns the routine's completion code
//! (the value written to the caller's completion slot). Protocol-level
//! argument checking happens before enqueue, in the session type.

pub mod bidiag;
pub mod cholesky;
pub mod eig;
pub mod lu;
pub mod qr;
pub mod svd;
pub mod tridiag;

use crate::CpuScalar;
use nalgebra::{ComplexField, DMatrix};
use unisolve_core::FillMode;

/// View `cols` columns of `rows` used rows from a column-major slice with
/// leading dimension `ld`.
pub(crate) fn mat_from_col_major<T: CpuScalar>(
    a: &[T],
    rows: usize,
    cols: usize,
    ld: usize,
) -> DMatrix<T> {
    DMatrix::from_fn(rows, cols, |i, j| a[j * ld + i])
}

/// Write a matrix back into a column-major slice with leading dimension
/// `ld`. Elements in the gap between `mat.nrows()` and `ld` are untouched.
pub(crate) fn mat_to_col_major<T: CpuScalar>(mat: &DMatrix<T>, a: &mut [T], ld: usize) {
    for j in 0..mat.ncols() {
        for i in 0..mat.nrows() {
            a[j * ld + i] = mat[(i, j)];
        }
    }
}

/// Build the full Hermitian matrix from the triangle selected by `uplo`,
/// mirroring with conjugation. The opposite triangle of the input is never
/// read.
pub(crate) fn hermitian_from_triangle<T: CpuScalar>(
    a: &[T],
    n: usize,
    ld: usize,
    uplo: FillMode,
) -> DMatrix<T> {
    DMatrix::from_fn(n, n, |i, j| match uplo {
        FillMode::Upper => {
            if i <= j {
                a[j * ld + i]
            } else {
                a[i * ld + j].conjugate()
            }
        }
        FillMode::Lower => {
            if i >= j {
                a[j * ld + i]
            } else {
                a[i * ld + j].conjugate()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn col_major_round_trip_with_stride() {
        // 2 x 3 stored with ld = 4; gap rows marked with -1.
        let a = vec![
            1.0, 2.0, -1.0, -1.0, //
            3.0, 4.0, -1.0, -1.0, //
            5.0, 6.0, -1.0, -1.0,
        ];
        let m = mat_from_col_major::<f64>(&a, 2, 3, 4);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 2)], 6.0);

        let mut out = vec![0.0; 12];
        mat_to_col_major(&m, &mut out, 4);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[9], 6.0);
        // Stride gap untouched.
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn hermitian_mirror_conjugates() {
        // Upper triangle of [[1, 2+i], [conj, 3]] with ld = 2.
        let a = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0), // lower part, must be ignored
            Complex64::new(2.0, 1.0),
            Complex64::new(3.0, 0.0),
        ];
        let h = hermitian_from_triangle(&a, 2, 2, FillMode::Upper);
        assert_eq!(h[(1, 0)], Complex64::new(2.0, -1.0));
        assert_eq!(h[(0, 1)], Complex64::new(2.0, 1.0));
    }
}
