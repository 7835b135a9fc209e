//! The reference backend's session type.
//!
//! `CpuDenseSolver` is the opaque handle of the protocol: it owns nothing
//! but its bound execution queue. Every routine family is split into a
//! workspace query (a pure function of the configuration) and an execute
//! call that validates, enqueues, and returns. Algorithmic verdicts are
//! written to the caller's completion slot by the worker thread; read them
//! after [`CpuDenseSolver::synchronize`].

use std::sync::Arc;

use unisolve_core::params::{
    GebrdParams, GeqrfParams, GesvdParams, GetrfParams, GetrsParams, OrgbrParams, OrgqrParams,
    OrgtrParams, OrmqrParams, OrmtrParams, PotrfBatchedParams, PotrfParams, SyevdParams,
    SygvdParams, SytrdParams,
};
use unisolve_core::{Error, Result, Scalar, SvdJob};

use crate::buffer::CpuBuf;
use crate::queue::CpuQueue;
use crate::routines;
use crate::CpuScalar;

fn check_len<T: Copy + Default + Send + 'static>(
    name: &str,
    buf: &CpuBuf<T>,
    required: usize,
) -> Result<()> {
    if buf.len() < required {
        return Err(Error::InvalidValue(format!(
            "buffer {name} holds {} elements, {required} required",
            buf.len()
        )));
    }
    Ok(())
}

fn check_workspace<T: Copy + Default + Send + 'static>(
    work: &CpuBuf<T>,
    lwork: usize,
    required: usize,
) -> Result<()> {
    if lwork < required {
        return Err(Error::InvalidValue(format!(
            "workspace of {lwork} elements is below the queried size {required}"
        )));
    }
    check_len("work", work, lwork)
}

/// Session handle bound to one host execution queue.
pub struct CpuDenseSolver {
    queue: Arc<CpuQueue>,
}

impl CpuDenseSolver {
    /// Create a session with a fresh default queue.
    pub fn new() -> Result<Self> {
        let queue = Arc::new(CpuQueue::new()?);
        log::info!("host dense-solver session created");
        Ok(Self { queue })
    }

    /// Create a session bound to an existing queue.
    pub fn with_queue(queue: Arc<CpuQueue>) -> Self {
        Self { queue }
    }

    /// Rebind the session to another queue. Affects only where subsequent
    /// calls enqueue their work.
    pub fn set_queue(&mut self, queue: Arc<CpuQueue>) {
        self.queue = queue;
    }

    /// The currently bound queue.
    pub fn queue(&self) -> &Arc<CpuQueue> {
        &self.queue
    }

    /// Block until all work enqueued on the bound queue has completed.
    pub fn synchronize(&self) -> Result<()> {
        self.queue.synchronize()
    }

    // ------------------------------------------------------------------
    // LU
    // ------------------------------------------------------------------

    pub fn getrf_workspace<T: CpuScalar>(&self, p: GetrfParams) -> Result<usize> {
        p.validate()?;
        Ok(p.min_mn().max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn getrf<T: CpuScalar>(
        &self,
        p: GetrfParams,
        a: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        ipiv: &CpuBuf<i32>,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.getrf_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("ipiv", ipiv, p.min_mn())?;
        check_len("info", info, 1)?;

        let (a, ipiv, info) = (a.clone(), ipiv.clone(), info.clone());
        log::debug!("enqueue {}getrf m={} n={}", T::TAG, p.m, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut piv = vec![0i32; p.min_mn()];
            let code = routines::lu::getrf(p, &mut ah, &mut piv);
            a.copy_from_host(&ah);
            ipiv.write_at(0, &piv);
            info.write_at(0, &[code]);
        })
    }

    pub fn getrs_workspace<T: CpuScalar>(&self, p: GetrsParams) -> Result<usize> {
        p.validate()?;
        Ok(p.n.max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn getrs<T: CpuScalar>(
        &self,
        p: GetrsParams,
        a: &CpuBuf<T>,
        ipiv: &CpuBuf<i32>,
        b: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.getrs_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("ipiv", ipiv, p.n)?;
        check_len("b", b, p.b_len())?;
        check_len("info", info, 1)?;

        let (a, ipiv, b, info) = (a.clone(), ipiv.clone(), b.clone(), info.clone());
        log::debug!("enqueue {}getrs n={} nrhs={}", T::TAG, p.n, p.nrhs);
        self.queue.submit(move || {
            let ah = a.to_host();
            let piv = ipiv.to_host();
            let mut bh = b.to_host();
            let code = routines::lu::getrs(p, &ah, &piv, &mut bh);
            b.copy_from_host(&bh);
            info.write_at(0, &[code]);
        })
    }

    // ------------------------------------------------------------------
    // Cholesky
    // ------------------------------------------------------------------

    pub fn potrf_workspace<T: CpuScalar>(&self, p: PotrfParams) -> Result<usize> {
        p.validate()?;
        Ok(p.n.max(1))
    }

    pub fn potrf<T: CpuScalar>(
        &self,
        p: PotrfParams,
        a: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.potrf_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("info", info, 1)?;

        let (a, info) = (a.clone(), info.clone());
        log::debug!("enqueue {}potrf n={}", T::TAG, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let code = routines::cholesky::potrf(p, &mut ah);
            a.copy_from_host(&ah);
            info.write_at(0, &[code]);
        })
    }

    pub fn potrf_batched_workspace<T: CpuScalar>(&self, p: PotrfBatchedParams) -> Result<usize> {
        p.validate()?;
        // One shared size for the whole batch.
        Ok(p.n.max(1))
    }

    pub fn potrf_batched<T: CpuScalar>(
        &self,
        p: PotrfBatchedParams,
        a: &[CpuBuf<T>],
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.potrf_batched_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        if a.len() != p.batch {
            return Err(Error::InvalidValue(format!(
                "batch of {} buffers does not match batch count {}",
                a.len(),
                p.batch
            )));
        }
        for (k, buf) in a.iter().enumerate() {
            check_len(&format!("a[{k}]"), buf, p.one().a_len())?;
        }
        check_len("info", info, p.batch)?;

        let bufs: Vec<CpuBuf<T>> = a.to_vec();
        let info = info.clone();
        log::debug!("enqueue {}potrf_batched n={} batch={}", T::TAG, p.n, p.batch);
        self.queue.submit(move || {
            let mut codes = vec![0i32; p.batch];
            // Elements are independent; one failure must not stop the rest.
            for (k, buf) in bufs.iter().enumerate() {
                let mut ah = buf.to_host();
                codes[k] = routines::cholesky::potrf(p.one(), &mut ah);
                if codes[k] == 0 {
                    buf.copy_from_host(&ah);
                }
            }
            let failures = codes.iter().filter(|&&c| c != 0).count();
            if failures > 0 {
                log::warn!(
                    "{failures} of {} batch elements were not positive definite",
                    p.batch
                );
            }
            if p.batch > 0 {
                info.write_at(0, &codes);
            }
        })
    }

    // ------------------------------------------------------------------
    // QR
    // ------------------------------------------------------------------

    pub fn geqrf_workspace<T: CpuScalar>(&self, p: GeqrfParams) -> Result<usize> {
        p.validate()?;
        Ok(p.min_mn().max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn geqrf<T: CpuScalar>(
        &self,
        p: GeqrfParams,
        a: &CpuBuf<T>,
        tau: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.geqrf_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("tau", tau, p.min_mn())?;
        check_len("info", info, 1)?;

        let (a, tau, info) = (a.clone(), tau.clone(), info.clone());
        log::debug!("enqueue {}geqrf m={} n={}", T::TAG, p.m, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut tauh = tau.to_host();
            let code = routines::qr::geqrf(p, &mut ah, &mut tauh);
            a.copy_from_host(&ah);
            tau.copy_from_host(&tauh);
            info.write_at(0, &[code]);
        })
    }

    pub fn orgqr_workspace<T: CpuScalar>(&self, p: OrgqrParams) -> Result<usize> {
        p.validate()?;
        Err(Error::NotSupported(
            "orgqr consumes packed reflector storage, which this backend does not produce".into(),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orgqr<T: CpuScalar>(
        &self,
        p: OrgqrParams,
        _a: &CpuBuf<T>,
        _tau: &CpuBuf<T>,
        _work: &CpuBuf<T>,
        _lwork: usize,
        _info: &CpuBuf<i32>,
    ) -> Result<()> {
        self.orgqr_workspace::<T>(p).map(|_| ())
    }

    pub fn ormqr_workspace<T: CpuScalar>(&self, p: OrmqrParams) -> Result<usize> {
        p.validate()?;
        Err(Error::NotSupported(
            "ormqr consumes packed reflector storage, which this backend does not produce".into(),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ormqr<T: CpuScalar>(
        &self,
        p: OrmqrParams,
        _a: &CpuBuf<T>,
        _tau: &CpuBuf<T>,
        _c: &CpuBuf<T>,
        _work: &CpuBuf<T>,
        _lwork: usize,
        _info: &CpuBuf<i32>,
    ) -> Result<()> {
        self.ormqr_workspace::<T>(p).map(|_| ())
    }

    // ------------------------------------------------------------------
    // Bidiagonal reduction
    // ------------------------------------------------------------------

    pub fn gebrd_workspace<T: CpuScalar>(&self, p: GebrdParams) -> Result<usize> {
        p.validate()?;
        Ok((p.m + p.n).max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn gebrd<T: CpuScalar>(
        &self,
        p: GebrdParams,
        a: &CpuBuf<T>,
        d: &CpuBuf<<T as Scalar>::Real>,
        e: &CpuBuf<<T as Scalar>::Real>,
        tauq: &CpuBuf<T>,
        taup: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.gebrd_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        let min_mn = p.min_mn();
        check_len("a", a, p.a_len())?;
        check_len("d", d, min_mn)?;
        check_len("e", e, min_mn.saturating_sub(1))?;
        check_len("tauq", tauq, min_mn)?;
        check_len("taup", taup, min_mn)?;
        check_len("info", info, 1)?;

        let (a, d, e, tauq, taup, info) = (
            a.clone(),
            d.clone(),
            e.clone(),
            tauq.clone(),
            taup.clone(),
            info.clone(),
        );
        log::debug!("enqueue {}gebrd m={} n={}", T::TAG, p.m, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut dh: Vec<<T as Scalar>::Real> = vec![Default::default(); min_mn];
            let mut eh: Vec<<T as Scalar>::Real> = vec![Default::default(); min_mn.saturating_sub(1)];
            let mut tauqh = vec![T::default(); min_mn];
            let mut tauph = vec![T::default(); min_mn];
            let code = routines::bidiag::gebrd(p, &mut ah, &mut dh, &mut eh, &mut tauqh, &mut tauph);
            a.copy_from_host(&ah);
            d.write_at(0, &dh);
            e.write_at(0, &eh);
            tauq.write_at(0, &tauqh);
            taup.write_at(0, &tauph);
            info.write_at(0, &[code]);
        })
    }

    pub fn orgbr_workspace<T: CpuScalar>(&self, p: OrgbrParams) -> Result<usize> {
        p.validate()?;
        Err(Error::NotSupported(
            "orgbr consumes packed reflector storage, which this backend does not produce".into(),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orgbr<T: CpuScalar>(
        &self,
        p: OrgbrParams,
        _a: &CpuBuf<T>,
        _tau: &CpuBuf<T>,
        _work: &CpuBuf<T>,
        _lwork: usize,
        _info: &CpuBuf<i32>,
    ) -> Result<()> {
        self.orgbr_workspace::<T>(p).map(|_| ())
    }

    // ------------------------------------------------------------------
    // Tridiagonal reduction
    // ------------------------------------------------------------------

    pub fn sytrd_workspace<T: CpuScalar>(&self, p: SytrdParams) -> Result<usize> {
        p.validate()?;
        Ok(p.n.max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sytrd<T: CpuScalar>(
        &self,
        p: SytrdParams,
        a: &CpuBuf<T>,
        d: &CpuBuf<<T as Scalar>::Real>,
        e: &CpuBuf<<T as Scalar>::Real>,
        tau: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.sytrd_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("d", d, p.n)?;
        check_len("e", e, p.n.saturating_sub(1))?;
        check_len("tau", tau, p.n.saturating_sub(1))?;
        check_len("info", info, 1)?;

        let (a, d, e, tau, info) = (a.clone(), d.clone(), e.clone(), tau.clone(), info.clone());
        log::debug!("enqueue {}sytrd n={}", T::TAG, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut dh: Vec<<T as Scalar>::Real> = vec![Default::default(); p.n];
            let mut eh: Vec<<T as Scalar>::Real> = vec![Default::default(); p.n.saturating_sub(1)];
            let mut tauh = vec![T::default(); p.n.saturating_sub(1)];
            let code = routines::tridiag::sytrd(p, &mut ah, &mut dh, &mut eh, &mut tauh);
            a.copy_from_host(&ah);
            d.write_at(0, &dh);
            e.write_at(0, &eh);
            tau.write_at(0, &tauh);
            info.write_at(0, &[code]);
        })
    }

    pub fn orgtr_workspace<T: CpuScalar>(&self, p: OrgtrParams) -> Result<usize> {
        p.validate()?;
        Ok(p.n.max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orgtr<T: CpuScalar>(
        &self,
        p: OrgtrParams,
        a: &CpuBuf<T>,
        _tau: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.orgtr_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("info", info, 1)?;

        let (a, info) = (a.clone(), info.clone());
        log::debug!("enqueue {}orgtr n={}", T::TAG, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let code = routines::tridiag::orgtr::<T>(&mut ah);
            a.copy_from_host(&ah);
            info.write_at(0, &[code]);
        })
    }

    pub fn ormtr_workspace<T: CpuScalar>(&self, p: OrmtrParams) -> Result<usize> {
        p.validate()?;
        Ok(p.q_order().max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ormtr<T: CpuScalar>(
        &self,
        p: OrmtrParams,
        a: &CpuBuf<T>,
        _tau: &CpuBuf<T>,
        c: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.ormtr_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("c", c, p.c_len())?;
        check_len("info", info, 1)?;

        let (a, c, info) = (a.clone(), c.clone(), info.clone());
        log::debug!("enqueue {}ormtr m={} n={}", T::TAG, p.m, p.n);
        self.queue.submit(move || {
            let ah = a.to_host();
            let mut ch = c.to_host();
            let code = routines::tridiag::ormtr(p, &ah, &mut ch);
            c.copy_from_host(&ch);
            info.write_at(0, &[code]);
        })
    }

    // ------------------------------------------------------------------
    // Eigen-decomposition
    // ------------------------------------------------------------------

    pub fn syevd_workspace<T: CpuScalar>(&self, p: SyevdParams) -> Result<usize> {
        p.validate()?;
        Ok((2 * p.n).max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn syevd<T: CpuScalar>(
        &self,
        p: SyevdParams,
        a: &CpuBuf<T>,
        d: &CpuBuf<<T as Scalar>::Real>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.syevd_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("d", d, p.n)?;
        check_len("info", info, 1)?;

        let (a, d, info) = (a.clone(), d.clone(), info.clone());
        log::debug!("enqueue {}syevd n={}", T::TAG, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut dh: Vec<<T as Scalar>::Real> = vec![Default::default(); p.n];
            let code = routines::eig::syevd(p, &mut ah, &mut dh);
            a.copy_from_host(&ah);
            d.write_at(0, &dh);
            info.write_at(0, &[code]);
        })
    }

    pub fn sygvd_workspace<T: CpuScalar>(&self, p: SygvdParams) -> Result<usize> {
        p.validate()?;
        Ok((2 * p.n).max(1))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sygvd<T: CpuScalar>(
        &self,
        p: SygvdParams,
        a: &CpuBuf<T>,
        b: &CpuBuf<T>,
        d: &CpuBuf<<T as Scalar>::Real>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.sygvd_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        check_len("a", a, p.a_len())?;
        check_len("b", b, p.b_len())?;
        check_len("d", d, p.n)?;
        check_len("info", info, 1)?;

        let (a, b, d, info) = (a.clone(), b.clone(), d.clone(), info.clone());
        log::debug!("enqueue {}sygvd n={}", T::TAG, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut bh = b.to_host();
            let mut dh: Vec<<T as Scalar>::Real> = vec![Default::default(); p.n];
            let code = routines::eig::sygvd(p, &mut ah, &mut bh, &mut dh);
            a.copy_from_host(&ah);
            b.copy_from_host(&bh);
            d.write_at(0, &dh);
            info.write_at(0, &[code]);
        })
    }

    // ------------------------------------------------------------------
    // SVD
    // ------------------------------------------------------------------

    pub fn gesvd_workspace<T: CpuScalar>(&self, p: GesvdParams) -> Result<usize> {
        p.validate()?;
        self.check_gesvd_support(&p)?;
        let (min, max) = (p.min_mn(), p.m.max(p.n));
        Ok((3 * min + max).max(5 * min).max(1))
    }

    fn check_gesvd_support(&self, p: &GesvdParams) -> Result<()> {
        if (p.jobu == SvdJob::All || p.jobv == SvdJob::All) && p.m != p.n {
            return Err(Error::NotSupported(
                "full singular-vector factors of a rectangular matrix are not available in this \
                 backend; request the thin factors instead"
                    .into(),
            ));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn gesvd<T: CpuScalar>(
        &self,
        p: GesvdParams,
        a: &CpuBuf<T>,
        s: &CpuBuf<<T as Scalar>::Real>,
        u: &CpuBuf<T>,
        vt: &CpuBuf<T>,
        work: &CpuBuf<T>,
        lwork: usize,
        info: &CpuBuf<i32>,
    ) -> Result<()> {
        let required = self.gesvd_workspace::<T>(p)?;
        check_workspace(work, lwork, required)?;
        let min_mn = p.min_mn();
        check_len("a", a, p.a_len())?;
        check_len("s", s, min_mn)?;
        if matches!(p.jobu, SvdJob::All | SvdJob::Thin) {
            let cols = if p.jobu == SvdJob::All { p.m } else { min_mn };
            check_len("u", u, unisolve_core::params::required_len(p.m, cols, p.ldu))?;
        }
        if matches!(p.jobv, SvdJob::All | SvdJob::Thin) {
            let rows = if p.jobv == SvdJob::All { p.n } else { min_mn };
            check_len("vt", vt, unisolve_core::params::required_len(rows, p.n, p.ldv))?;
        }
        check_len("info", info, 1)?;

        let (a, s, u, vt, info) = (a.clone(), s.clone(), u.clone(), vt.clone(), info.clone());
        log::debug!("enqueue {}gesvd m={} n={}", T::TAG, p.m, p.n);
        self.queue.submit(move || {
            let mut ah = a.to_host();
            let mut sh: Vec<<T as Scalar>::Real> = vec![Default::default(); min_mn];
            let mut uh = u.to_host();
            let mut vth = vt.to_host();
            let code = routines::svd::gesvd(p, &mut ah, &mut sh, &mut uh, &mut vth);
            a.copy_from_host(&ah);
            s.write_at(0, &sh);
            u.copy_from_host(&uh);
            vt.copy_from_host(&vth);
            info.write_at(0, &[code]);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisolve_core::{FillMode, Status};

    #[test]
    fn workspace_query_is_deterministic() {
        let solver = CpuDenseSolver::new().unwrap();
        let p = GetrfParams { m: 64, n: 32, lda: 64 };
        let a = solver.getrf_workspace::<f64>(p).unwrap();
        let b = solver.getrf_workspace::<f64>(p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn workspace_below_query_is_rejected() {
        let solver = CpuDenseSolver::new().unwrap();
        let p = PotrfParams {
            uplo: FillMode::Lower,
            n: 4,
            lda: 4,
        };
        let required = solver.potrf_workspace::<f64>(p).unwrap();
        let a = CpuBuf::from_host(&[1.0f64; 16]);
        let work: CpuBuf<f64> = CpuBuf::zeros(required - 1);
        let info: CpuBuf<i32> = CpuBuf::zeros(1);
        let err = solver
            .potrf(p, &a, &work, required - 1, &info)
            .unwrap_err();
        assert_eq!(err.status(), Status::InvalidValue);
    }

    #[test]
    fn unsupported_routine_reports_not_supported() {
        let solver = CpuDenseSolver::new().unwrap();
        let p = OrgqrParams { m: 4, n: 4, k: 4, lda: 4 };
        let err = solver.orgqr_workspace::<f64>(p).unwrap_err();
        assert_eq!(err.status(), Status::NotSupported);
    }

    #[test]
    fn short_buffer_is_rejected_before_enqueue() {
        let solver = CpuDenseSolver::new().unwrap();
        let p = GetrfParams { m: 3, n: 3, lda: 3 };
        let lwork = solver.getrf_workspace::<f64>(p).unwrap();
        let a = CpuBuf::from_host(&[0.0f64; 8]); // one short of 9
        let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
        let ipiv: CpuBuf<i32> = CpuBuf::zeros(3);
        let info: CpuBuf<i32> = CpuBuf::zeros(1);
        let err = solver
            .getrf(p, &a, &work, lwork, &ipiv, &info)
            .unwrap_err();
        assert_eq!(err.status(), Status::InvalidValue);
    }
}
