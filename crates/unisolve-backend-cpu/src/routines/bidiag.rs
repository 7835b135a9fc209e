//! Bidiagonal reduction, delegated to `nalgebra::linalg::Bidiagonal`.

use super::mat_from_col_major;
use crate::CpuScalar;
use nalgebra::linalg::Bidiagonal;
use nalgebra::ComplexField;
use unisolve_core::params::GebrdParams;
use unisolve_core::Scalar;

/// Reduce an m x n matrix to real bidiagonal form.
///
/// `d` receives the min(m, n) diagonal entries and `e` the min(m, n) - 1
/// off-diagonal entries (above the diagonal for m >= n, below otherwise).
/// The buffer is overwritten with the bidiagonal band itself; the
/// orthogonal factors are consumed by the library, so `tauq`/`taup` are
/// cleared and the reconstruction routine is not available in this
/// backend.
pub fn gebrd<T: CpuScalar>(
    p: GebrdParams,
    a: &mut [T],
    d: &mut [<T as Scalar>::Real],
    e: &mut [<T as Scalar>::Real],
    tauq: &mut [T],
    taup: &mut [T],
) -> i32 {
    let (m, n) = (p.m, p.n);
    let min_mn = p.min_mn();
    if min_mn == 0 {
        return 0;
    }

    // The reduction is run on a tall matrix; a wide input is reduced
    // through its adjoint, which flips the band below the diagonal and
    // leaves the real coefficients unchanged.
    let upper = m >= n;
    let bid = if upper {
        Bidiagonal::new(mat_from_col_major(a, m, n, p.lda))
    } else {
        Bidiagonal::new(mat_from_col_major(a, m, n, p.lda).adjoint())
    };

    let diag = bid.diagonal();
    let off = bid.off_diagonal();
    for k in 0..min_mn {
        d[k] = diag[k].real();
    }
    for k in 0..min_mn.saturating_sub(1) {
        e[k] = off[k].real();
    }

    for j in 0..n {
        for i in 0..m {
            a[j * p.lda + i] = T::default();
        }
    }
    for k in 0..min_mn {
        a[k * p.lda + k] = T::from_real(diag[k].real());
    }
    for k in 0..min_mn.saturating_sub(1) {
        if upper {
            a[(k + 1) * p.lda + k] = T::from_real(off[k].real());
        } else {
            a[k * p.lda + k + 1] = T::from_real(off[k].real());
        }
    }

    for t in tauq.iter_mut().take(min_mn) {
        *t = T::default();
    }
    for t in taup.iter_mut().take(min_mn) {
        *t = T::default();
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_preserves_singular_values() {
        // The bidiagonal form is orthogonally equivalent to the input, so
        // the Frobenius norm is preserved.
        let p = GebrdParams { m: 3, n: 3, lda: 3 };
        let a0 = vec![12.0, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0];
        let mut a = a0.clone();
        let mut d = vec![0.0; 3];
        let mut e = vec![0.0; 2];
        let mut tauq = vec![0.0; 3];
        let mut taup = vec![0.0; 3];
        assert_eq!(gebrd::<f64>(p, &mut a, &mut d, &mut e, &mut tauq, &mut taup), 0);

        let band_norm: f64 = d.iter().map(|x| x * x).sum::<f64>() + e.iter().map(|x| x * x).sum::<f64>();
        let full_norm: f64 = a0.iter().map(|x| x * x).sum();
        assert!((band_norm - full_norm).abs() < 1e-8 * full_norm);
    }

    #[test]
    fn wide_input_reports_lower_band() {
        let p = GebrdParams { m: 2, n: 3, lda: 2 };
        let mut a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let mut d = vec![0.0; 2];
        let mut e = vec![0.0; 1];
        let mut tauq = vec![0.0; 2];
        let mut taup = vec![0.0; 2];
        assert_eq!(gebrd::<f64>(p, &mut a, &mut d, &mut e, &mut tauq, &mut taup), 0);
        // Band sits below the diagonal: entry (1, 0) carries e[0].
        assert!((a[1] - e[0]).abs() < 1e-12);
        assert_eq!(a[2], 0.0);
    }
}
