//! Tridiagonal reduction and its orthogonal-factor routines, delegated to
//! `nalgebra::linalg::SymmetricTridiagonal`.
//!
//! This backend stores the accumulated orthogonal factor explicitly in the
//! matrix buffer (the packed-reflector form belongs to the vendor
//! libraries), so the follow-up routines read it straight back.

use super::{hermitian_from_triangle, mat_from_col_major, mat_to_col_major};
use crate::CpuScalar;
use nalgebra::linalg::SymmetricTridiagonal;
use nalgebra::ComplexField;
use unisolve_core::params::{OrmtrParams, SytrdParams};
use unisolve_core::{Op, Scalar, Side};

/// Reduce a Hermitian matrix to real tridiagonal form, A = Q T Q^H.
///
/// `d` receives the diagonal of T, `e` its off-diagonal. The buffer is
/// overwritten with the explicit factor Q; `tau` is cleared because no
/// reflectors are stored.
pub fn sytrd<T: CpuScalar>(
    p: SytrdParams,
    a: &mut [T],
    d: &mut [<T as Scalar>::Real],
    e: &mut [<T as Scalar>::Real],
    tau: &mut [T],
) -> i32 {
    let n = p.n;
    if n == 0 {
        return 0;
    }
    if n == 1 {
        d[0] = a[0].real();
        a[0] = nalgebra::one::<T>();
        return 0;
    }

    let tri = SymmetricTridiagonal::new(hermitian_from_triangle(a, n, p.lda, p.uplo));
    let (q, diag, off) = tri.unpack();
    for k in 0..n {
        d[k] = diag[k].real();
    }
    for k in 0..n - 1 {
        e[k] = off[k].real();
    }
    mat_to_col_major(&q, a, p.lda);
    for t in tau.iter_mut().take(n - 1) {
        *t = T::default();
    }
    0
}

/// Reconstruct the orthogonal factor of a [`sytrd`] reduction.
///
/// The factor is already explicit in the buffer, so this is a
/// validation-only pass.
pub fn orgtr<T: CpuScalar>(_a: &mut [T]) -> i32 {
    0
}

/// Overwrite C with op(Q) * C or C * op(Q), where Q is the explicit factor
/// left in `a` by [`sytrd`].
pub fn ormtr<T: CpuScalar>(p: OrmtrParams, a: &[T], c: &mut [T]) -> i32 {
    if p.m == 0 || p.n == 0 {
        return 0;
    }
    let r = p.q_order();
    let q = mat_from_col_major(a, r, r, p.lda);
    let opq = match p.trans {
        Op::None => q,
        Op::Transpose => q.transpose(),
        Op::ConjTranspose => q.adjoint(),
    };
    let cm = mat_from_col_major(c, p.m, p.n, p.ldc);
    let result = match p.side {
        Side::Left => opq * cm,
        Side::Right => cm * opq,
    };
    mat_to_col_major(&result, c, p.ldc);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisolve_core::FillMode;

    fn tridiag_params(n: usize) -> SytrdParams {
        SytrdParams {
            uplo: FillMode::Lower,
            n,
            lda: n,
        }
    }

    #[test]
    fn reduction_preserves_the_matrix() {
        // A = Q T Q^T must hold for the reported D, E, and Q.
        let n = 3;
        let a0 = vec![4.0, 1.0, 2.0, 1.0, 5.0, 3.0, 2.0, 3.0, 6.0];
        let mut a = a0.clone();
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n - 1];
        let mut tau = vec![0.0; n - 1];
        assert_eq!(sytrd::<f64>(tridiag_params(n), &mut a, &mut d, &mut e, &mut tau), 0);

        // Rebuild T.
        let mut t = vec![0.0; n * n];
        for k in 0..n {
            t[k * n + k] = d[k];
        }
        for k in 0..n - 1 {
            t[k * n + k + 1] = e[k];
            t[(k + 1) * n + k] = e[k];
        }

        // Q T Q^T, all column-major.
        let mut qt = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                let mut acc = 0.0;
                for k in 0..n {
                    acc += a[k * n + i] * t[j * n + k];
                }
                qt[j * n + i] = acc;
            }
        }
        for i in 0..n {
            for j in 0..n {
                let mut acc = 0.0;
                for k in 0..n {
                    acc += qt[k * n + i] * a[k * n + j];
                }
                assert!((acc - a0[j * n + i]).abs() < 1e-10, "({i}, {j})");
            }
        }
    }

    #[test]
    fn one_by_one_is_trivial() {
        let mut a = vec![7.5];
        let mut d = vec![0.0];
        let mut e: Vec<f64> = vec![];
        let mut tau: Vec<f64> = vec![];
        assert_eq!(sytrd::<f64>(tridiag_params(1), &mut a, &mut d, &mut e, &mut tau), 0);
        assert_eq!(d[0], 7.5);
        assert_eq!(a[0], 1.0);
    }

    #[test]
    fn apply_factor_from_both_sides() {
        let n = 2;
        let mut a = vec![2.0, 1.0, 1.0, 2.0];
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n - 1];
        let mut tau = vec![0.0; n - 1];
        assert_eq!(sytrd::<f64>(tridiag_params(n), &mut a, &mut d, &mut e, &mut tau), 0);

        // Q^T Q = I: applying Q then Q^T from the left is the identity.
        let p_fwd = OrmtrParams {
            side: Side::Left,
            uplo: FillMode::Lower,
            trans: Op::None,
            m: n,
            n: 1,
            lda: n,
            ldc: n,
        };
        let p_back = OrmtrParams {
            trans: Op::Transpose,
            ..p_fwd
        };
        let mut c = vec![1.0, 2.0];
        assert_eq!(ormtr::<f64>(p_fwd, &a, &mut c), 0);
        assert_eq!(ormtr::<f64>(p_back, &a, &mut c), 0);
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 2.0).abs() < 1e-12);
    }
}
