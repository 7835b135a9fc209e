//! The CUDA backend's session type.
//!
//! Owns a cuSOLVER dense handle bound to a stream. Execute calls enqueue
//! asynchronous device work and return immediately; completion slots are
//! device memory written by the library and must be copied back after
//! [`CudaDenseSolver::synchronize`]. Workspace sufficiency is the vendor
//! library's contract and is forwarded unchecked.

use std::mem::MaybeUninit;
use std::sync::Arc;

use cudarc::cusolver::sys;
use cudarc::driver::{CudaSlice, CudaStream, DevicePtr, DevicePtrMut};

use unisolve_core::params::{
    GebrdParams, GeqrfParams, GesvdParams, GetrfParams, GetrsParams, OrgbrParams, OrgqrParams,
    OrgtrParams, OrmqrParams, OrmtrParams, PotrfBatchedParams, PotrfParams, SyevdParams,
    SygvdParams, SytrdParams,
};
use unisolve_core::{Error, Result};

use crate::context::CudaContext;
use crate::dispatch::{check, eig_mode, eig_type, fill_mode, operation, side_mode, CudaScalar};

fn dim(v: usize, what: &str) -> Result<i32> {
    i32::try_from(v).map_err(|_| {
        Error::InvalidValue(format!("{what} = {v} exceeds the vendor 32-bit limit"))
    })
}

/// Session handle bound to one CUDA stream.
pub struct CudaDenseSolver {
    #[allow(dead_code)]
    ctx: Arc<CudaContext>,
    stream: Arc<CudaStream>,
    handle: sys::cusolverDnHandle_t,
}

impl CudaDenseSolver {
    /// Create a session on the context's default stream.
    pub fn new(ctx: Arc<CudaContext>) -> Result<Self> {
        let mut handle = MaybeUninit::uninit();
        let status = unsafe { sys::cusolverDnCreate(handle.as_mut_ptr()) };
        check(status, "cusolverDnCreate")?;
        let handle = unsafe { handle.assume_init() };

        let stream = ctx.stream().clone();
        let mut solver = Self { ctx, stream: stream.clone(), handle };
        solver.set_queue(stream)?;
        log::info!("cuSOLVER dense session created");
        Ok(solver)
    }

    /// Rebind subsequent calls onto another stream.
    pub fn set_queue(&mut self, stream: Arc<CudaStream>) -> Result<()> {
        let status = unsafe {
            sys::cusolverDnSetStream(self.handle, stream.cu_stream() as _)
        };
        check(status, "cusolverDnSetStream")?;
        self.stream = stream;
        Ok(())
    }

    /// The currently bound stream.
    pub fn queue(&self) -> &Arc<CudaStream> {
        &self.stream
    }

    /// Block until all work enqueued on the bound stream has completed.
    pub fn synchronize(&self) -> Result<()> {
        self.stream
            .synchronize()
            .map_err(|e| Error::ExecutionFailed(format!("stream synchronize failed: {e}")))
    }

    // ------------------------------------------------------------------
    // LU
    // ------------------------------------------------------------------

    pub fn getrf_workspace<T: CudaScalar>(
        &self,
        p: GetrfParams,
        a: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (m, n, lda) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.lda, "lda")?);
        let mut lwork = 0i32;
        let (a_ptr, _g) = a.device_ptr(&self.stream);
        let status =
            unsafe { T::getrf_buffer_size(self.handle, m, n, a_ptr as _, lda, &mut lwork) };
        check(status, "getrf workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    /// The factorization draws its scratch space from `work`; the vendor
    /// library sizes it through the query and takes no element count here.
    pub fn getrf<T: CudaScalar>(
        &self,
        p: GetrfParams,
        a: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        ipiv: &mut CudaSlice<i32>,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n, lda) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.lda, "lda")?);
        log::debug!("enqueue {}getrf m={m} n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (p_ptr, _gp) = ipiv.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::getrf(self.handle, m, n, a_ptr as _, lda, w_ptr as _, p_ptr as _, i_ptr as _)
        };
        check(status, "getrf")
    }

    /// The vendor library needs no scratch space for the solve.
    pub fn getrs_workspace<T: CudaScalar>(&self, p: GetrsParams) -> Result<usize> {
        p.validate()?;
        Ok(0)
    }

    pub fn getrs<T: CudaScalar>(
        &self,
        p: GetrsParams,
        a: &CudaSlice<T::Dev>,
        ipiv: &CudaSlice<i32>,
        b: &mut CudaSlice<T::Dev>,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, nrhs) = (dim(p.n, "n")?, dim(p.nrhs, "nrhs")?);
        let (lda, ldb) = (dim(p.lda, "lda")?, dim(p.ldb, "ldb")?);
        log::debug!("enqueue {}getrs n={n} nrhs={nrhs}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (p_ptr, _gp) = ipiv.device_ptr(&self.stream);
        let (b_ptr, _gb) = b.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::getrs(
                self.handle,
                operation(p.trans),
                n,
                nrhs,
                a_ptr as _,
                lda,
                p_ptr as _,
                b_ptr as _,
                ldb,
                i_ptr as _,
            )
        };
        check(status, "getrs")
    }

    // ------------------------------------------------------------------
    // Cholesky
    // ------------------------------------------------------------------

    pub fn potrf_workspace<T: CudaScalar>(
        &self,
        p: PotrfParams,
        a: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let mut lwork = 0i32;
        let (a_ptr, _g) = a.device_ptr(&self.stream);
        let status = unsafe {
            T::potrf_buffer_size(self.handle, fill_mode(p.uplo), n, a_ptr as _, lda, &mut lwork)
        };
        check(status, "potrf workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    pub fn potrf<T: CudaScalar>(
        &self,
        p: PotrfParams,
        a: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}potrf n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::potrf(
                self.handle,
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "potrf")
    }

    /// One shared workspace size for the whole batch; the vendor library
    /// needs none.
    pub fn potrf_batched_workspace<T: CudaScalar>(&self, p: PotrfBatchedParams) -> Result<usize> {
        p.validate()?;
        Ok(0)
    }

    /// `a_ptrs` is the device array of per-matrix device pointers; `info`
    /// holds one completion slot per batch element.
    pub fn potrf_batched<T: CudaScalar>(
        &self,
        p: PotrfBatchedParams,
        a_ptrs: &mut CudaSlice<u64>,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let batch = dim(p.batch, "batch")?;
        log::debug!("enqueue {}potrf_batched n={n} batch={batch}", T::TAG);
        let (a_ptr, _ga) = a_ptrs.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::potrf_batched(
                self.handle,
                fill_mode(p.uplo),
                n,
                a_ptr as *mut *mut T::Dev,
                lda,
                i_ptr as _,
                batch,
            )
        };
        check(status, "potrf_batched")
    }

    // ------------------------------------------------------------------
    // QR
    // ------------------------------------------------------------------

    pub fn geqrf_workspace<T: CudaScalar>(
        &self,
        p: GeqrfParams,
        a: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (m, n, lda) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.lda, "lda")?);
        let mut lwork = 0i32;
        let (a_ptr, _g) = a.device_ptr(&self.stream);
        let status =
            unsafe { T::geqrf_buffer_size(self.handle, m, n, a_ptr as _, lda, &mut lwork) };
        check(status, "geqrf workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn geqrf<T: CudaScalar>(
        &self,
        p: GeqrfParams,
        a: &mut CudaSlice<T::Dev>,
        tau: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n, lda) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.lda, "lda")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}geqrf m={m} n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::geqrf(self.handle, m, n, a_ptr as _, lda, t_ptr as _, w_ptr as _, lwork, i_ptr as _)
        };
        check(status, "geqrf")
    }

    pub fn orgqr_workspace<T: CudaScalar>(
        &self,
        p: OrgqrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (m, n, k) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.k, "k")?);
        let lda = dim(p.lda, "lda")?;
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let status = unsafe {
            T::orgqr_buffer_size(self.handle, m, n, k, a_ptr as _, lda, t_ptr as _, &mut lwork)
        };
        check(status, "orgqr workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orgqr<T: CudaScalar>(
        &self,
        p: OrgqrParams,
        a: &mut CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n, k) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.k, "k")?);
        let lda = dim(p.lda, "lda")?;
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}orgqr m={m} n={n} k={k}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::orgqr(
                self.handle, m, n, k, a_ptr as _, lda, t_ptr as _, w_ptr as _, lwork, i_ptr as _,
            )
        };
        check(status, "orgqr")
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ormqr_workspace<T: CudaScalar>(
        &self,
        p: OrmqrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        c: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (m, n, k) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.k, "k")?);
        let (lda, ldc) = (dim(p.lda, "lda")?, dim(p.ldc, "ldc")?);
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (c_ptr, _gc) = c.device_ptr(&self.stream);
        let status = unsafe {
            T::ormqr_buffer_size(
                self.handle,
                side_mode(p.side),
                operation(p.trans),
                m,
                n,
                k,
                a_ptr as _,
                lda,
                t_ptr as _,
                c_ptr as _,
                ldc,
                &mut lwork,
            )
        };
        check(status, "ormqr workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ormqr<T: CudaScalar>(
        &self,
        p: OrmqrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        c: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n, k) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.k, "k")?);
        let (lda, ldc) = (dim(p.lda, "lda")?, dim(p.ldc, "ldc")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}ormqr m={m} n={n} k={k}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (c_ptr, _gc) = c.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::ormqr(
                self.handle,
                side_mode(p.side),
                operation(p.trans),
                m,
                n,
                k,
                a_ptr as _,
                lda,
                t_ptr as _,
                c_ptr as _,
                ldc,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "ormqr")
    }

    // ------------------------------------------------------------------
    // Bidiagonal and tridiagonal reductions
    // ------------------------------------------------------------------

    pub fn gebrd_workspace<T: CudaScalar>(&self, p: GebrdParams) -> Result<usize> {
        p.validate()?;
        let (m, n) = (dim(p.m, "m")?, dim(p.n, "n")?);
        let mut lwork = 0i32;
        let status = unsafe { T::gebrd_buffer_size(self.handle, m, n, &mut lwork) };
        check(status, "gebrd workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn gebrd<T: CudaScalar>(
        &self,
        p: GebrdParams,
        a: &mut CudaSlice<T::Dev>,
        d: &mut CudaSlice<T::DevReal>,
        e: &mut CudaSlice<T::DevReal>,
        tauq: &mut CudaSlice<T::Dev>,
        taup: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n, lda) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.lda, "lda")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}gebrd m={m} n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (d_ptr, _gd) = d.device_ptr_mut(&self.stream);
        let (e_ptr, _ge) = e.device_ptr_mut(&self.stream);
        let (tq_ptr, _gq) = tauq.device_ptr_mut(&self.stream);
        let (tp_ptr, _gp) = taup.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::gebrd(
                self.handle,
                m,
                n,
                a_ptr as _,
                lda,
                d_ptr as _,
                e_ptr as _,
                tq_ptr as _,
                tp_ptr as _,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "gebrd")
    }

    pub fn orgbr_workspace<T: CudaScalar>(
        &self,
        p: OrgbrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (m, n, k) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.k, "k")?);
        let lda = dim(p.lda, "lda")?;
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let status = unsafe {
            T::orgbr_buffer_size(
                self.handle,
                side_mode(p.vect),
                m,
                n,
                k,
                a_ptr as _,
                lda,
                t_ptr as _,
                &mut lwork,
            )
        };
        check(status, "orgbr workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orgbr<T: CudaScalar>(
        &self,
        p: OrgbrParams,
        a: &mut CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n, k) = (dim(p.m, "m")?, dim(p.n, "n")?, dim(p.k, "k")?);
        let lda = dim(p.lda, "lda")?;
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}orgbr m={m} n={n} k={k}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::orgbr(
                self.handle,
                side_mode(p.vect),
                m,
                n,
                k,
                a_ptr as _,
                lda,
                t_ptr as _,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "orgbr")
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sytrd_workspace<T: CudaScalar>(
        &self,
        p: SytrdParams,
        a: &CudaSlice<T::Dev>,
        d: &CudaSlice<T::DevReal>,
        e: &CudaSlice<T::DevReal>,
        tau: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (d_ptr, _gd) = d.device_ptr(&self.stream);
        let (e_ptr, _ge) = e.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let status = unsafe {
            T::sytrd_buffer_size(
                self.handle,
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                d_ptr as _,
                e_ptr as _,
                t_ptr as _,
                &mut lwork,
            )
        };
        check(status, "sytrd workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sytrd<T: CudaScalar>(
        &self,
        p: SytrdParams,
        a: &mut CudaSlice<T::Dev>,
        d: &mut CudaSlice<T::DevReal>,
        e: &mut CudaSlice<T::DevReal>,
        tau: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}sytrd n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (d_ptr, _gd) = d.device_ptr_mut(&self.stream);
        let (e_ptr, _ge) = e.device_ptr_mut(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::sytrd(
                self.handle,
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                d_ptr as _,
                e_ptr as _,
                t_ptr as _,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "sytrd")
    }

    pub fn orgtr_workspace<T: CudaScalar>(
        &self,
        p: OrgtrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let status = unsafe {
            T::orgtr_buffer_size(
                self.handle,
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                t_ptr as _,
                &mut lwork,
            )
        };
        check(status, "orgtr workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn orgtr<T: CudaScalar>(
        &self,
        p: OrgtrParams,
        a: &mut CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}orgtr n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::orgtr(
                self.handle,
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                t_ptr as _,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "orgtr")
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ormtr_workspace<T: CudaScalar>(
        &self,
        p: OrmtrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        c: &CudaSlice<T::Dev>,
    ) -> Result<usize> {
        p.validate()?;
        let (m, n) = (dim(p.m, "m")?, dim(p.n, "n")?);
        let (lda, ldc) = (dim(p.lda, "lda")?, dim(p.ldc, "ldc")?);
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (c_ptr, _gc) = c.device_ptr(&self.stream);
        let status = unsafe {
            T::ormtr_buffer_size(
                self.handle,
                side_mode(p.side),
                fill_mode(p.uplo),
                operation(p.trans),
                m,
                n,
                a_ptr as _,
                lda,
                t_ptr as _,
                c_ptr as _,
                ldc,
                &mut lwork,
            )
        };
        check(status, "ormtr workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ormtr<T: CudaScalar>(
        &self,
        p: OrmtrParams,
        a: &CudaSlice<T::Dev>,
        tau: &CudaSlice<T::Dev>,
        c: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n) = (dim(p.m, "m")?, dim(p.n, "n")?);
        let (lda, ldc) = (dim(p.lda, "lda")?, dim(p.ldc, "ldc")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}ormtr m={m} n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (t_ptr, _gt) = tau.device_ptr(&self.stream);
        let (c_ptr, _gc) = c.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::ormtr(
                self.handle,
                side_mode(p.side),
                fill_mode(p.uplo),
                operation(p.trans),
                m,
                n,
                a_ptr as _,
                lda,
                t_ptr as _,
                c_ptr as _,
                ldc,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "ormtr")
    }

    // ------------------------------------------------------------------
    // Eigen-decomposition
    // ------------------------------------------------------------------

    pub fn syevd_workspace<T: CudaScalar>(
        &self,
        p: SyevdParams,
        a: &CudaSlice<T::Dev>,
        d: &CudaSlice<T::DevReal>,
    ) -> Result<usize> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (d_ptr, _gd) = d.device_ptr(&self.stream);
        let status = unsafe {
            T::syevd_buffer_size(
                self.handle,
                eig_mode(p.jobz),
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                d_ptr as _,
                &mut lwork,
            )
        };
        check(status, "syevd workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn syevd<T: CudaScalar>(
        &self,
        p: SyevdParams,
        a: &mut CudaSlice<T::Dev>,
        d: &mut CudaSlice<T::DevReal>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, lda) = (dim(p.n, "n")?, dim(p.lda, "lda")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}syevd n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (d_ptr, _gd) = d.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::syevd(
                self.handle,
                eig_mode(p.jobz),
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                d_ptr as _,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "syevd")
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sygvd_workspace<T: CudaScalar>(
        &self,
        p: SygvdParams,
        a: &CudaSlice<T::Dev>,
        b: &CudaSlice<T::Dev>,
        d: &CudaSlice<T::DevReal>,
    ) -> Result<usize> {
        p.validate()?;
        let (n, lda, ldb) = (dim(p.n, "n")?, dim(p.lda, "lda")?, dim(p.ldb, "ldb")?);
        let mut lwork = 0i32;
        let (a_ptr, _ga) = a.device_ptr(&self.stream);
        let (b_ptr, _gb) = b.device_ptr(&self.stream);
        let (d_ptr, _gd) = d.device_ptr(&self.stream);
        let status = unsafe {
            T::sygvd_buffer_size(
                self.handle,
                eig_type(p.itype),
                eig_mode(p.jobz),
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                b_ptr as _,
                ldb,
                d_ptr as _,
                &mut lwork,
            )
        };
        check(status, "sygvd workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sygvd<T: CudaScalar>(
        &self,
        p: SygvdParams,
        a: &mut CudaSlice<T::Dev>,
        b: &mut CudaSlice<T::Dev>,
        d: &mut CudaSlice<T::DevReal>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (n, lda, ldb) = (dim(p.n, "n")?, dim(p.lda, "lda")?, dim(p.ldb, "ldb")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}sygvd n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (b_ptr, _gb) = b.device_ptr_mut(&self.stream);
        let (d_ptr, _gd) = d.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let status = unsafe {
            T::sygvd(
                self.handle,
                eig_type(p.itype),
                eig_mode(p.jobz),
                fill_mode(p.uplo),
                n,
                a_ptr as _,
                lda,
                b_ptr as _,
                ldb,
                d_ptr as _,
                w_ptr as _,
                lwork,
                i_ptr as _,
            )
        };
        check(status, "sygvd")
    }

    // ------------------------------------------------------------------
    // SVD
    // ------------------------------------------------------------------

    pub fn gesvd_workspace<T: CudaScalar>(&self, p: GesvdParams) -> Result<usize> {
        p.validate()?;
        let (m, n) = (dim(p.m, "m")?, dim(p.n, "n")?);
        let mut lwork = 0i32;
        let status = unsafe { T::gesvd_buffer_size(self.handle, m, n, &mut lwork) };
        check(status, "gesvd workspace query")?;
        Ok(lwork.max(0) as usize)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn gesvd<T: CudaScalar>(
        &self,
        p: GesvdParams,
        a: &mut CudaSlice<T::Dev>,
        s: &mut CudaSlice<T::DevReal>,
        u: &mut CudaSlice<T::Dev>,
        vt: &mut CudaSlice<T::Dev>,
        work: &mut CudaSlice<T::Dev>,
        lwork: usize,
        rwork: Option<&mut CudaSlice<T::DevReal>>,
        info: &mut CudaSlice<i32>,
    ) -> Result<()> {
        p.validate()?;
        let (m, n) = (dim(p.m, "m")?, dim(p.n, "n")?);
        let (lda, ldu, ldv) = (dim(p.lda, "lda")?, dim(p.ldu, "ldu")?, dim(p.ldv, "ldv")?);
        let lwork = dim(lwork, "lwork")?;
        log::debug!("enqueue {}gesvd m={m} n={n}", T::TAG);
        let (a_ptr, _ga) = a.device_ptr_mut(&self.stream);
        let (s_ptr, _gs) = s.device_ptr_mut(&self.stream);
        let (u_ptr, _gu) = u.device_ptr_mut(&self.stream);
        let (v_ptr, _gv) = vt.device_ptr_mut(&self.stream);
        let (w_ptr, _gw) = work.device_ptr_mut(&self.stream);
        let (i_ptr, _gi) = info.device_ptr_mut(&self.stream);
        let (r_ptr, _gr) = match rwork {
            Some(r) => {
                let (p, g) = r.device_ptr_mut(&self.stream);
                (p as *mut T::DevReal, Some(g))
            }
            None => (std::ptr::null_mut(), None),
        };
        let status = unsafe {
            T::gesvd(
                self.handle,
                p.jobu.as_char() as i8,
                p.jobv.as_char() as i8,
                m,
                n,
                a_ptr as _,
                lda,
                s_ptr as _,
                u_ptr as _,
                ldu,
                v_ptr as _,
                ldv,
                w_ptr as _,
                lwork,
                r_ptr,
                i_ptr as _,
            )
        };
        check(status, "gesvd")
    }
}

impl Drop for CudaDenseSolver {
    fn drop(&mut self) {
        unsafe {
            let _ = sys::cusolverDnDestroy(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_context() -> Option<Arc<CudaContext>> {
        if !CudaContext::is_available() {
            return None;
        }
        CudaContext::new().ok().map(Arc::new)
    }

    #[test]
    fn session_lifecycle() {
        let ctx = match try_context() {
            Some(c) => c,
            None => {
                eprintln!("Skipping test: no CUDA device available");
                return;
            }
        };
        let solver = CudaDenseSolver::new(ctx);
        assert!(solver.is_ok());
    }

    #[test]
    fn getrf_round_trip_on_device() {
        let ctx = match try_context() {
            Some(c) => c,
            None => {
                eprintln!("Skipping test: no CUDA device available");
                return;
            }
        };
        let solver = CudaDenseSolver::new(ctx.clone()).unwrap();
        let stream = ctx.stream();

        let p = GetrfParams { m: 3, n: 3, lda: 3 };
        let host = [12.0f64, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0];
        let mut a = stream.memcpy_stod(&host[..]).unwrap();
        let lwork = solver.getrf_workspace::<f64>(p, &a).unwrap();
        let mut work: CudaSlice<f64> = stream.alloc_zeros(lwork.max(1)).unwrap();
        let mut ipiv: CudaSlice<i32> = stream.alloc_zeros(3).unwrap();
        let mut info: CudaSlice<i32> = stream.alloc_zeros(1).unwrap();

        solver.getrf::<f64>(p, &mut a, &mut work, &mut ipiv, &mut info).unwrap();
        solver.synchronize().unwrap();

        let info_host = stream.memcpy_dtov(&info).unwrap();
        assert_eq!(info_host[0], 0);
        let factored = stream.memcpy_dtov(&a).unwrap();
        assert_eq!(factored.len(), 9);
        // The first pivot is the largest magnitude entry of column 0.
        assert!(factored[0].abs() >= 11.9);
    }

    #[test]
    #[ignore = "requires CUDA hardware"]
    fn workspace_query_is_deterministic_on_device() {
        let ctx = Arc::new(CudaContext::new().expect("CUDA context creation failed"));
        let solver = CudaDenseSolver::new(ctx.clone()).unwrap();
        let p = GetrfParams { m: 32, n: 32, lda: 32 };
        let a: CudaSlice<f64> = ctx.stream().alloc_zeros(32 * 32).unwrap();
        let w1 = solver.getrf_workspace::<f64>(p, &a).unwrap();
        let w2 = solver.getrf_workspace::<f64>(p, &a).unwrap();
        assert_eq!(w1, w2);
    }
}
