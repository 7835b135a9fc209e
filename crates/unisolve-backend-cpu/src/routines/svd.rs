//! Singular value decomposition, delegated to `nalgebra::linalg::SVD`.

use super::mat_from_col_major;
use crate::CpuScalar;
use nalgebra::linalg::SVD;
use nalgebra::ComplexField;
use unisolve_core::params::GesvdParams;
use unisolve_core::{Scalar, SvdJob};

const MAX_SWEEPS: usize = 10_000;

/// Decompose an m x n matrix as U * S * V^H.
///
/// Singular values land in `s` in descending order. Vector outputs follow
/// the requested jobs: the thin factors go to `u`/`vt` (V is returned in
/// its transposed form), or overwrite the input buffer for the overwrite
/// job. Returns a positive completion code when the iteration fails to
/// converge.
pub fn gesvd<T: CpuScalar>(
    p: GesvdParams,
    a: &mut [T],
    s: &mut [<T as Scalar>::Real],
    u: &mut [T],
    vt: &mut [T],
) -> i32 {
    let (m, n) = (p.m, p.n);
    let min_mn = p.min_mn();
    if min_mn == 0 {
        return 0;
    }

    let want_u = p.jobu != SvdJob::NoVectors;
    let want_v = p.jobv != SvdJob::NoVectors;
    let eps: <T as ComplexField>::RealField = nalgebra::convert(1e-12);
    let svd = match SVD::try_new(
        mat_from_col_major(a, m, n, p.lda),
        want_u,
        want_v,
        eps,
        MAX_SWEEPS,
    ) {
        Some(svd) => svd,
        None => return 1,
    };

    let mut order: Vec<usize> = (0..min_mn).collect();
    order.sort_by(|&x, &y| {
        svd.singular_values[y]
            .partial_cmp(&svd.singular_values[x])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (k, &src) in order.iter().enumerate() {
        s[k] = svd.singular_values[src];
    }

    if want_u {
        if let Some(svd_u) = &svd.u {
            let (dst, ld) = match p.jobu {
                SvdJob::Overwrite => (&mut *a, p.lda),
                _ => (&mut *u, p.ldu),
            };
            for (k, &src) in order.iter().enumerate() {
                for i in 0..m {
                    dst[k * ld + i] = svd_u[(i, src)];
                }
            }
        }
    }

    if want_v {
        if let Some(svd_vt) = &svd.v_t {
            let (dst, ld) = match p.jobv {
                SvdJob::Overwrite => (&mut *a, p.lda),
                _ => (&mut *vt, p.ldv),
            };
            for j in 0..n {
                for (k, &src) in order.iter().enumerate() {
                    dst[j * ld + k] = svd_vt[(src, j)];
                }
            }
        }
    }

    0
}
