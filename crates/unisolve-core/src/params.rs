//! Per-routine shape/mode parameters and their validation.
//!
//! Both backends and the C surface route through these checks before
//! dispatching, so protocol-level argument errors are caught in one place
//! and reported synchronously. Matrices are column-major; `lda`-style
//! leading dimensions may exceed the row count to describe sub-matrix
//! views, which is why required buffer lengths are computed as
//! `ld * (cols - 1) + rows` rather than `rows * cols`.

use crate::error::{Error, Result};
use crate::modes::{EigMode, EigType, FillMode, Op, Side, SvdJob};

/// Required element count of a column-major buffer with `cols` columns of
/// `rows` used rows and leading dimension `ld`.
pub fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if cols == 0 || rows == 0 {
        0
    } else {
        ld * (cols - 1) + rows
    }
}

fn check_ld(name: &str, ld: usize, rows: usize) -> Result<()> {
    if ld < rows.max(1) {
        return Err(Error::InvalidValue(format!(
            "{name} = {ld} is below the row count {rows}"
        )));
    }
    Ok(())
}

/// LU factorization of an m x n matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetrfParams {
    pub m: usize,
    pub n: usize,
    pub lda: usize,
}

impl GetrfParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.m)
    }

    /// Number of pivot indices produced.
    pub fn min_mn(&self) -> usize {
        self.m.min(self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.m, self.n, self.lda)
    }
}

/// Solve op(A) X = B from LU factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetrsParams {
    pub trans: Op,
    pub n: usize,
    pub nrhs: usize,
    pub lda: usize,
    pub ldb: usize,
}

impl GetrsParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)?;
        check_ld("ldb", self.ldb, self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.n, self.n, self.lda)
    }

    pub fn b_len(&self) -> usize {
        required_len(self.n, self.nrhs, self.ldb)
    }
}

/// Cholesky factorization of an n x n matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotrfParams {
    pub uplo: FillMode,
    pub n: usize,
    pub lda: usize,
}

impl PotrfParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.n, self.n, self.lda)
    }
}

/// Batched Cholesky over `batch` equally shaped n x n matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotrfBatchedParams {
    pub uplo: FillMode,
    pub n: usize,
    pub lda: usize,
    pub batch: usize,
}

impl PotrfBatchedParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)
    }

    pub fn one(&self) -> PotrfParams {
        PotrfParams {
            uplo: self.uplo,
            n: self.n,
            lda: self.lda,
        }
    }
}

/// QR factorization of an m x n matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeqrfParams {
    pub m: usize,
    pub n: usize,
    pub lda: usize,
}

impl GeqrfParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.m)
    }

    pub fn min_mn(&self) -> usize {
        self.m.min(self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.m, self.n, self.lda)
    }
}

/// Reconstruct the explicit m x n orthogonal factor from k reflectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgqrParams {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
}

impl OrgqrParams {
    pub fn validate(&self) -> Result<()> {
        if self.n > self.m {
            return Err(Error::InvalidValue(format!(
                "n = {} exceeds m = {}",
                self.n, self.m
            )));
        }
        if self.k > self.n {
            return Err(Error::InvalidValue(format!(
                "k = {} exceeds n = {}",
                self.k, self.n
            )));
        }
        check_ld("lda", self.lda, self.m)
    }
}

/// Multiply C by the orthogonal factor of a QR factorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrmqrParams {
    pub side: Side,
    pub trans: Op,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
    pub ldc: usize,
}

impl OrmqrParams {
    /// Order of the orthogonal factor: m when applied from the left,
    /// n from the right.
    pub fn q_order(&self) -> usize {
        match self.side {
            Side::Left => self.m,
            Side::Right => self.n,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.k > self.q_order() {
            return Err(Error::InvalidValue(format!(
                "k = {} exceeds the factor order {}",
                self.k,
                self.q_order()
            )));
        }
        check_ld("lda", self.lda, self.q_order())?;
        check_ld("ldc", self.ldc, self.m)
    }

    pub fn c_len(&self) -> usize {
        required_len(self.m, self.n, self.ldc)
    }
}

/// Reconstruct an orthogonal factor of a bidiagonal reduction.
///
/// `vect` selects which factor: [`Side::Left`] for the column-space
/// factor, [`Side::Right`] for the row-space factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgbrParams {
    pub vect: Side,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
}

impl OrgbrParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.m)
    }
}

/// Reconstruct the orthogonal factor of a tridiagonal reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgtrParams {
    pub uplo: FillMode,
    pub n: usize,
    pub lda: usize,
}

impl OrgtrParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.n, self.n, self.lda)
    }
}

/// Multiply C by the orthogonal factor of a tridiagonal reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrmtrParams {
    pub side: Side,
    pub uplo: FillMode,
    pub trans: Op,
    pub m: usize,
    pub n: usize,
    pub lda: usize,
    pub ldc: usize,
}

impl OrmtrParams {
    pub fn q_order(&self) -> usize {
        match self.side {
            Side::Left => self.m,
            Side::Right => self.n,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.q_order())?;
        check_ld("ldc", self.ldc, self.m)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.q_order(), self.q_order(), self.lda)
    }

    pub fn c_len(&self) -> usize {
        required_len(self.m, self.n, self.ldc)
    }
}

/// Bidiagonal reduction of an m x n matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GebrdParams {
    pub m: usize,
    pub n: usize,
    pub lda: usize,
}

impl GebrdParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.m)
    }

    pub fn min_mn(&self) -> usize {
        self.m.min(self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.m, self.n, self.lda)
    }
}

/// Tridiagonal reduction of a symmetric/Hermitian n x n matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SytrdParams {
    pub uplo: FillMode,
    pub n: usize,
    pub lda: usize,
}

impl SytrdParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.n, self.n, self.lda)
    }
}

/// Symmetric/Hermitian eigen-decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyevdParams {
    pub jobz: EigMode,
    pub uplo: FillMode,
    pub n: usize,
    pub lda: usize,
}

impl SyevdParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.n, self.n, self.lda)
    }
}

/// Generalized symmetric-definite eigen-decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SygvdParams {
    pub itype: EigType,
    pub jobz: EigMode,
    pub uplo: FillMode,
    pub n: usize,
    pub lda: usize,
    pub ldb: usize,
}

impl SygvdParams {
    pub fn validate(&self) -> Result<()> {
        check_ld("lda", self.lda, self.n)?;
        check_ld("ldb", self.ldb, self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.n, self.n, self.lda)
    }

    pub fn b_len(&self) -> usize {
        required_len(self.n, self.n, self.ldb)
    }
}

/// Singular value decomposition of an m x n matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GesvdParams {
    pub jobu: SvdJob,
    pub jobv: SvdJob,
    pub m: usize,
    pub n: usize,
    pub lda: usize,
    pub ldu: usize,
    pub ldv: usize,
}

impl GesvdParams {
    pub fn validate(&self) -> Result<()> {
        if self.jobu == SvdJob::Overwrite && self.jobv == SvdJob::Overwrite {
            return Err(Error::InvalidValue(
                "jobu and jobv cannot both overwrite the input".into(),
            ));
        }
        check_ld("lda", self.lda, self.m)?;
        if self.jobu != SvdJob::NoVectors && self.jobu != SvdJob::Overwrite {
            check_ld("ldu", self.ldu, self.m)?;
        }
        if self.jobv != SvdJob::NoVectors && self.jobv != SvdJob::Overwrite {
            let rows = match self.jobv {
                SvdJob::All => self.n,
                _ => self.m.min(self.n),
            };
            check_ld("ldv", self.ldv, rows)?;
        }
        Ok(())
    }

    pub fn min_mn(&self) -> usize {
        self.m.min(self.n)
    }

    pub fn a_len(&self) -> usize {
        required_len(self.m, self.n, self.lda)
    }
}
