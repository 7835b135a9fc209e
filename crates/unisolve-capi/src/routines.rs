//! The routine function table, stamped out per precision.
//!
//! Each family expands to a `_buffer_size` / execute pair for the four
//! scalar instantiations (`s`/`d`/`c`/`z`). Mode arguments arrive as raw
//! integers and are checked against the enum vocabulary before anything
//! else; on any synchronous failure no output is written. Execute calls
//! enqueue onto the session's bound queue and return immediately.

#![allow(clippy::too_many_arguments, clippy::missing_safety_doc)]

use num_complex::{Complex32, Complex64};
use unisolve_backend_cpu::routines;
use unisolve_core::params::{
    GebrdParams, GeqrfParams, GesvdParams, GetrfParams, GetrsParams, OrgbrParams, OrgqrParams,
    OrgtrParams, OrmqrParams, OrmtrParams, PotrfBatchedParams, PotrfParams, SyevdParams,
    SygvdParams, SytrdParams,
};
use unisolve_core::{EigMode, EigType, Error, FillMode, Op, Result, Side, SvdJob};

use crate::registry::with_session;
use crate::{non_null, udim, wrap, SendMut};

fn fill_arg(raw: i32) -> Result<FillMode> {
    FillMode::from_raw(raw).ok_or_else(|| Error::InvalidEnum(format!("fill mode {raw}")))
}

fn op_arg(raw: i32) -> Result<Op> {
    Op::from_raw(raw).ok_or_else(|| Error::InvalidEnum(format!("operation {raw}")))
}

fn side_arg(raw: i32) -> Result<Side> {
    Side::from_raw(raw).ok_or_else(|| Error::InvalidEnum(format!("side {raw}")))
}

fn eig_mode_arg(raw: i32) -> Result<EigMode> {
    EigMode::from_raw(raw).ok_or_else(|| Error::InvalidEnum(format!("eigen mode {raw}")))
}

fn eig_type_arg(raw: i32) -> Result<EigType> {
    EigType::from_raw(raw).ok_or_else(|| Error::InvalidEnum(format!("eigen problem type {raw}")))
}

fn svd_job_arg(raw: i8) -> Result<SvdJob> {
    SvdJob::from_raw(raw as i32).ok_or_else(|| Error::InvalidEnum(format!("svd job {raw}")))
}

fn check_lwork(lwork: usize, required: usize) -> Result<()> {
    if lwork < required {
        return Err(Error::InvalidValue(format!(
            "workspace of {lwork} elements is below the queried size {required}"
        )));
    }
    Ok(())
}

/// Write a queried size out, refusing sizes beyond the 32-bit surface.
unsafe fn write_size(out: *mut i32, size: usize) -> Result<()> {
    let size =
        i32::try_from(size).map_err(|_| Error::InternalError(format!("size {size} overflows")))?;
    unsafe { out.write(size) };
    Ok(())
}

/// Length-checked raw slice; a zero length never touches the pointer.
unsafe fn slice_mut<'a, T>(p: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 {
        &mut []
    } else {
        unsafe { std::slice::from_raw_parts_mut(p, len) }
    }
}

// ----------------------------------------------------------------------
// getrf
// ----------------------------------------------------------------------

macro_rules! capi_getrf {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(handle: u64, m: i32, n: i32, lda: i32, lwork: *mut i32) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = GetrfParams { m: udim(m, "m")?, n: udim(n, "n")?, lda: udim(lda, "lda")? };
                let size = with_session(handle, |s| s.solver.getrf_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            m: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            work: *mut $t,
            lwork: i32,
            ipiv: *mut i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = GetrfParams { m: udim(m, "m")?, n: udim(n, "n")?, lda: udim(lda, "lda")? };
                non_null(a, "a")?;
                non_null(ipiv, "ipiv")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, ipiv, info) = (SendMut::new(a), SendMut::new(ipiv), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.getrf_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, piv_len) = (p.a_len(), p.min_mn());
                    s.solver.queue().submit(move || {
                        let code = routines::lu::getrf::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(ipiv.get(), piv_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_getrf!(unisolve_sgetrf_buffer_size, unisolve_sgetrf, f32);
capi_getrf!(unisolve_dgetrf_buffer_size, unisolve_dgetrf, f64);
capi_getrf!(unisolve_cgetrf_buffer_size, unisolve_cgetrf, Complex32);
capi_getrf!(unisolve_zgetrf_buffer_size, unisolve_zgetrf, Complex64);

// ----------------------------------------------------------------------
// getrs
// ----------------------------------------------------------------------

macro_rules! capi_getrs {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            trans: i32,
            n: i32,
            nrhs: i32,
            lda: i32,
            ldb: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = GetrsParams {
                    trans: op_arg(trans)?,
                    n: udim(n, "n")?,
                    nrhs: udim(nrhs, "nrhs")?,
                    lda: udim(lda, "lda")?,
                    ldb: udim(ldb, "ldb")?,
                };
                let size = with_session(handle, |s| s.solver.getrs_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            trans: i32,
            n: i32,
            nrhs: i32,
            a: *mut $t,
            lda: i32,
            ipiv: *mut i32,
            b: *mut $t,
            ldb: i32,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = GetrsParams {
                    trans: op_arg(trans)?,
                    n: udim(n, "n")?,
                    nrhs: udim(nrhs, "nrhs")?,
                    lda: udim(lda, "lda")?,
                    ldb: udim(ldb, "ldb")?,
                };
                non_null(a, "a")?;
                non_null(ipiv, "ipiv")?;
                non_null(b, "b")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, ipiv, b, info) =
                    (SendMut::new(a), SendMut::new(ipiv), SendMut::new(b), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.getrs_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, b_len, piv_len) = (p.a_len(), p.b_len(), p.n);
                    s.solver.queue().submit(move || {
                        let code = routines::lu::getrs::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(ipiv.get(), piv_len) },
                            unsafe { slice_mut(b.get(), b_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_getrs!(unisolve_sgetrs_buffer_size, unisolve_sgetrs, f32);
capi_getrs!(unisolve_dgetrs_buffer_size, unisolve_dgetrs, f64);
capi_getrs!(unisolve_cgetrs_buffer_size, unisolve_cgetrs, Complex32);
capi_getrs!(unisolve_zgetrs_buffer_size, unisolve_zgetrs, Complex64);

// ----------------------------------------------------------------------
// potrf / potrf_batched
// ----------------------------------------------------------------------

macro_rules! capi_potrf {
    ($ws:ident, $exec:ident, $ws_batched:ident, $exec_batched:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(handle: u64, uplo: i32, n: i32, lda: i32, lwork: *mut i32) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = PotrfParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                let size = with_session(handle, |s| s.solver.potrf_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            uplo: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = PotrfParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                non_null(a, "a")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, info) = (SendMut::new(a), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.potrf_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let a_len = p.a_len();
                    s.solver.queue().submit(move || {
                        let code =
                            routines::cholesky::potrf::<$t>(p, unsafe { slice_mut(a.get(), a_len) });
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $ws_batched(
            handle: u64,
            uplo: i32,
            n: i32,
            lda: i32,
            lwork: *mut i32,
            batch: i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = PotrfBatchedParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    batch: udim(batch, "batch")?,
                };
                let size = with_session(handle, |s| s.solver.potrf_batched_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec_batched(
            handle: u64,
            uplo: i32,
            n: i32,
            a: *const *mut $t,
            lda: i32,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
            batch: i32,
        ) -> i32 {
            wrap(|| {
                let p = PotrfBatchedParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    batch: udim(batch, "batch")?,
                };
                non_null(info, "info")?;
                if p.batch > 0 {
                    non_null(a, "a")?;
                }
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let ptrs: Vec<SendMut<$t>> = if p.batch == 0 {
                    Vec::new()
                } else {
                    unsafe { std::slice::from_raw_parts(a, p.batch) }
                        .iter()
                        .map(|&ptr| SendMut::new(ptr))
                        .collect()
                };
                for (k, ptr) in ptrs.iter().enumerate() {
                    if ptr.get().is_null() {
                        return Err(Error::InvalidValue(format!("a[{k}] pointer is null")));
                    }
                }
                let info = SendMut::new(info);
                with_session(handle, |s| {
                    let required = s.solver.potrf_batched_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let a_len = p.one().a_len();
                    s.solver.queue().submit(move || {
                        // Per-element verdicts; one failure never stops the rest.
                        for (k, ptr) in ptrs.iter().enumerate() {
                            let code = routines::cholesky::potrf::<$t>(p.one(), unsafe {
                                slice_mut(ptr.get(), a_len)
                            });
                            unsafe { info.get().add(k).write(code) };
                        }
                    })
                })
            })
        }
    };
}

capi_potrf!(
    unisolve_spotrf_buffer_size,
    unisolve_spotrf,
    unisolve_spotrf_batched_buffer_size,
    unisolve_spotrf_batched,
    f32
);
capi_potrf!(
    unisolve_dpotrf_buffer_size,
    unisolve_dpotrf,
    unisolve_dpotrf_batched_buffer_size,
    unisolve_dpotrf_batched,
    f64
);
capi_potrf!(
    unisolve_cpotrf_buffer_size,
    unisolve_cpotrf,
    unisolve_cpotrf_batched_buffer_size,
    unisolve_cpotrf_batched,
    Complex32
);
capi_potrf!(
    unisolve_zpotrf_buffer_size,
    unisolve_zpotrf,
    unisolve_zpotrf_batched_buffer_size,
    unisolve_zpotrf_batched,
    Complex64
);

// ----------------------------------------------------------------------
// geqrf
// ----------------------------------------------------------------------

macro_rules! capi_geqrf {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(handle: u64, m: i32, n: i32, lda: i32, lwork: *mut i32) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = GeqrfParams { m: udim(m, "m")?, n: udim(n, "n")?, lda: udim(lda, "lda")? };
                let size = with_session(handle, |s| s.solver.geqrf_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            m: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            tau: *mut $t,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = GeqrfParams { m: udim(m, "m")?, n: udim(n, "n")?, lda: udim(lda, "lda")? };
                non_null(a, "a")?;
                non_null(tau, "tau")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, tau, info) = (SendMut::new(a), SendMut::new(tau), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.geqrf_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, tau_len) = (p.a_len(), p.min_mn());
                    s.solver.queue().submit(move || {
                        let code = routines::qr::geqrf::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(tau.get(), tau_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_geqrf!(unisolve_sgeqrf_buffer_size, unisolve_sgeqrf, f32);
capi_geqrf!(unisolve_dgeqrf_buffer_size, unisolve_dgeqrf, f64);
capi_geqrf!(unisolve_cgeqrf_buffer_size, unisolve_cgeqrf, Complex32);
capi_geqrf!(unisolve_zgeqrf_buffer_size, unisolve_zgeqrf, Complex64);

// ----------------------------------------------------------------------
// orgqr / ormqr / orgbr: not available in the reference backend; both
// phases report the same not-supported status the session type does.
// ----------------------------------------------------------------------

macro_rules! capi_orgqr {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            m: i32,
            n: i32,
            k: i32,
            lda: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = OrgqrParams {
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    k: udim(k, "k")?,
                    lda: udim(lda, "lda")?,
                };
                let size = with_session(handle, |s| s.solver.orgqr_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            m: i32,
            n: i32,
            k: i32,
            a: *mut $t,
            lda: i32,
            tau: *mut $t,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = OrgqrParams {
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    k: udim(k, "k")?,
                    lda: udim(lda, "lda")?,
                };
                let _ = (a, tau, work, lwork, info);
                with_session(handle, |s| s.solver.orgqr_workspace::<$t>(p).map(|_| ()))
            })
        }
    };
}

capi_orgqr!(unisolve_sorgqr_buffer_size, unisolve_sorgqr, f32);
capi_orgqr!(unisolve_dorgqr_buffer_size, unisolve_dorgqr, f64);
capi_orgqr!(unisolve_cungqr_buffer_size, unisolve_cungqr, Complex32);
capi_orgqr!(unisolve_zungqr_buffer_size, unisolve_zungqr, Complex64);

macro_rules! capi_ormqr {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            side: i32,
            trans: i32,
            m: i32,
            n: i32,
            k: i32,
            lda: i32,
            ldc: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = OrmqrParams {
                    side: side_arg(side)?,
                    trans: op_arg(trans)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    k: udim(k, "k")?,
                    lda: udim(lda, "lda")?,
                    ldc: udim(ldc, "ldc")?,
                };
                let size = with_session(handle, |s| s.solver.ormqr_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            side: i32,
            trans: i32,
            m: i32,
            n: i32,
            k: i32,
            a: *mut $t,
            lda: i32,
            tau: *mut $t,
            c: *mut $t,
            ldc: i32,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = OrmqrParams {
                    side: side_arg(side)?,
                    trans: op_arg(trans)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    k: udim(k, "k")?,
                    lda: udim(lda, "lda")?,
                    ldc: udim(ldc, "ldc")?,
                };
                let _ = (a, tau, c, work, lwork, info);
                with_session(handle, |s| s.solver.ormqr_workspace::<$t>(p).map(|_| ()))
            })
        }
    };
}

capi_ormqr!(unisolve_sormqr_buffer_size, unisolve_sormqr, f32);
capi_ormqr!(unisolve_dormqr_buffer_size, unisolve_dormqr, f64);
capi_ormqr!(unisolve_cunmqr_buffer_size, unisolve_cunmqr, Complex32);
capi_ormqr!(unisolve_zunmqr_buffer_size, unisolve_zunmqr, Complex64);

macro_rules! capi_orgbr {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            vect: i32,
            m: i32,
            n: i32,
            k: i32,
            lda: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = OrgbrParams {
                    vect: side_arg(vect)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    k: udim(k, "k")?,
                    lda: udim(lda, "lda")?,
                };
                let size = with_session(handle, |s| s.solver.orgbr_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            vect: i32,
            m: i32,
            n: i32,
            k: i32,
            a: *mut $t,
            lda: i32,
            tau: *mut $t,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = OrgbrParams {
                    vect: side_arg(vect)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    k: udim(k, "k")?,
                    lda: udim(lda, "lda")?,
                };
                let _ = (a, tau, work, lwork, info);
                with_session(handle, |s| s.solver.orgbr_workspace::<$t>(p).map(|_| ()))
            })
        }
    };
}

capi_orgbr!(unisolve_sorgbr_buffer_size, unisolve_sorgbr, f32);
capi_orgbr!(unisolve_dorgbr_buffer_size, unisolve_dorgbr, f64);
capi_orgbr!(unisolve_cungbr_buffer_size, unisolve_cungbr, Complex32);
capi_orgbr!(unisolve_zungbr_buffer_size, unisolve_zungbr, Complex64);

// ----------------------------------------------------------------------
// gebrd
// ----------------------------------------------------------------------

macro_rules! capi_gebrd {
    ($ws:ident, $exec:ident, $t:ty, $rt:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(handle: u64, m: i32, n: i32, lda: i32, lwork: *mut i32) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = GebrdParams { m: udim(m, "m")?, n: udim(n, "n")?, lda: udim(lda, "lda")? };
                let size = with_session(handle, |s| s.solver.gebrd_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            m: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            d: *mut $rt,
            e: *mut $rt,
            tauq: *mut $t,
            taup: *mut $t,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = GebrdParams { m: udim(m, "m")?, n: udim(n, "n")?, lda: udim(lda, "lda")? };
                non_null(a, "a")?;
                non_null(d, "d")?;
                non_null(e, "e")?;
                non_null(tauq, "tauq")?;
                non_null(taup, "taup")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, d, e, tauq, taup, info) = (
                    SendMut::new(a),
                    SendMut::new(d),
                    SendMut::new(e),
                    SendMut::new(tauq),
                    SendMut::new(taup),
                    SendMut::new(info),
                );
                with_session(handle, |s| {
                    let required = s.solver.gebrd_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, min_mn) = (p.a_len(), p.min_mn());
                    s.solver.queue().submit(move || {
                        let code = routines::bidiag::gebrd::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(d.get(), min_mn) },
                            unsafe { slice_mut(e.get(), min_mn.saturating_sub(1)) },
                            unsafe { slice_mut(tauq.get(), min_mn) },
                            unsafe { slice_mut(taup.get(), min_mn) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_gebrd!(unisolve_sgebrd_buffer_size, unisolve_sgebrd, f32, f32);
capi_gebrd!(unisolve_dgebrd_buffer_size, unisolve_dgebrd, f64, f64);
capi_gebrd!(unisolve_cgebrd_buffer_size, unisolve_cgebrd, Complex32, f32);
capi_gebrd!(unisolve_zgebrd_buffer_size, unisolve_zgebrd, Complex64, f64);

// ----------------------------------------------------------------------
// sytrd / orgtr / ormtr
// ----------------------------------------------------------------------

macro_rules! capi_sytrd {
    ($ws:ident, $exec:ident, $t:ty, $rt:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(handle: u64, uplo: i32, n: i32, lda: i32, lwork: *mut i32) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = SytrdParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                let size = with_session(handle, |s| s.solver.sytrd_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            uplo: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            d: *mut $rt,
            e: *mut $rt,
            tau: *mut $t,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = SytrdParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                non_null(a, "a")?;
                non_null(d, "d")?;
                non_null(e, "e")?;
                non_null(tau, "tau")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, d, e, tau, info) = (
                    SendMut::new(a),
                    SendMut::new(d),
                    SendMut::new(e),
                    SendMut::new(tau),
                    SendMut::new(info),
                );
                with_session(handle, |s| {
                    let required = s.solver.sytrd_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, n_len) = (p.a_len(), p.n);
                    s.solver.queue().submit(move || {
                        let code = routines::tridiag::sytrd::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(d.get(), n_len) },
                            unsafe { slice_mut(e.get(), n_len.saturating_sub(1)) },
                            unsafe { slice_mut(tau.get(), n_len.saturating_sub(1)) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_sytrd!(unisolve_ssytrd_buffer_size, unisolve_ssytrd, f32, f32);
capi_sytrd!(unisolve_dsytrd_buffer_size, unisolve_dsytrd, f64, f64);
capi_sytrd!(unisolve_chetrd_buffer_size, unisolve_chetrd, Complex32, f32);
capi_sytrd!(unisolve_zhetrd_buffer_size, unisolve_zhetrd, Complex64, f64);

macro_rules! capi_orgtr {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(handle: u64, uplo: i32, n: i32, lda: i32, lwork: *mut i32) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = OrgtrParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                let size = with_session(handle, |s| s.solver.orgtr_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            uplo: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            tau: *mut $t,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = OrgtrParams {
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                non_null(a, "a")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = (tau, work);
                let (a, info) = (SendMut::new(a), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.orgtr_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let a_len = p.a_len();
                    s.solver.queue().submit(move || {
                        let code =
                            routines::tridiag::orgtr::<$t>(unsafe { slice_mut(a.get(), a_len) });
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_orgtr!(unisolve_sorgtr_buffer_size, unisolve_sorgtr, f32);
capi_orgtr!(unisolve_dorgtr_buffer_size, unisolve_dorgtr, f64);
capi_orgtr!(unisolve_cungtr_buffer_size, unisolve_cungtr, Complex32);
capi_orgtr!(unisolve_zungtr_buffer_size, unisolve_zungtr, Complex64);

macro_rules! capi_ormtr {
    ($ws:ident, $exec:ident, $t:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            side: i32,
            uplo: i32,
            trans: i32,
            m: i32,
            n: i32,
            lda: i32,
            ldc: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = OrmtrParams {
                    side: side_arg(side)?,
                    uplo: fill_arg(uplo)?,
                    trans: op_arg(trans)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    ldc: udim(ldc, "ldc")?,
                };
                let size = with_session(handle, |s| s.solver.ormtr_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            side: i32,
            uplo: i32,
            trans: i32,
            m: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            tau: *mut $t,
            c: *mut $t,
            ldc: i32,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = OrmtrParams {
                    side: side_arg(side)?,
                    uplo: fill_arg(uplo)?,
                    trans: op_arg(trans)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    ldc: udim(ldc, "ldc")?,
                };
                non_null(a, "a")?;
                non_null(c, "c")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = (tau, work);
                let (a, c, info) = (SendMut::new(a), SendMut::new(c), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.ormtr_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, c_len) = (p.a_len(), p.c_len());
                    s.solver.queue().submit(move || {
                        let code = routines::tridiag::ormtr::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(c.get(), c_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_ormtr!(unisolve_sormtr_buffer_size, unisolve_sormtr, f32);
capi_ormtr!(unisolve_dormtr_buffer_size, unisolve_dormtr, f64);
capi_ormtr!(unisolve_cunmtr_buffer_size, unisolve_cunmtr, Complex32);
capi_ormtr!(unisolve_zunmtr_buffer_size, unisolve_zunmtr, Complex64);

// ----------------------------------------------------------------------
// syevd / sygvd
// ----------------------------------------------------------------------

macro_rules! capi_syevd {
    ($ws:ident, $exec:ident, $t:ty, $rt:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            jobz: i32,
            uplo: i32,
            n: i32,
            lda: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = SyevdParams {
                    jobz: eig_mode_arg(jobz)?,
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                let size = with_session(handle, |s| s.solver.syevd_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            jobz: i32,
            uplo: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            d: *mut $rt,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = SyevdParams {
                    jobz: eig_mode_arg(jobz)?,
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                };
                non_null(a, "a")?;
                non_null(d, "d")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, d, info) = (SendMut::new(a), SendMut::new(d), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.syevd_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, n_len) = (p.a_len(), p.n);
                    s.solver.queue().submit(move || {
                        let code = routines::eig::syevd::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(d.get(), n_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_syevd!(unisolve_ssyevd_buffer_size, unisolve_ssyevd, f32, f32);
capi_syevd!(unisolve_dsyevd_buffer_size, unisolve_dsyevd, f64, f64);
capi_syevd!(unisolve_cheevd_buffer_size, unisolve_cheevd, Complex32, f32);
capi_syevd!(unisolve_zheevd_buffer_size, unisolve_zheevd, Complex64, f64);

macro_rules! capi_sygvd {
    ($ws:ident, $exec:ident, $t:ty, $rt:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            itype: i32,
            jobz: i32,
            uplo: i32,
            n: i32,
            lda: i32,
            ldb: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = SygvdParams {
                    itype: eig_type_arg(itype)?,
                    jobz: eig_mode_arg(jobz)?,
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    ldb: udim(ldb, "ldb")?,
                };
                let size = with_session(handle, |s| s.solver.sygvd_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            itype: i32,
            jobz: i32,
            uplo: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            b: *mut $t,
            ldb: i32,
            d: *mut $rt,
            work: *mut $t,
            lwork: i32,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = SygvdParams {
                    itype: eig_type_arg(itype)?,
                    jobz: eig_mode_arg(jobz)?,
                    uplo: fill_arg(uplo)?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    ldb: udim(ldb, "ldb")?,
                };
                non_null(a, "a")?;
                non_null(b, "b")?;
                non_null(d, "d")?;
                non_null(info, "info")?;
                let lwork = udim(lwork, "lwork")?;
                let _ = work;
                let (a, b, d, info) =
                    (SendMut::new(a), SendMut::new(b), SendMut::new(d), SendMut::new(info));
                with_session(handle, |s| {
                    let required = s.solver.sygvd_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let (a_len, b_len, n_len) = (p.a_len(), p.b_len(), p.n);
                    s.solver.queue().submit(move || {
                        let code = routines::eig::sygvd::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(b.get(), b_len) },
                            unsafe { slice_mut(d.get(), n_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_sygvd!(unisolve_ssygvd_buffer_size, unisolve_ssygvd, f32, f32);
capi_sygvd!(unisolve_dsygvd_buffer_size, unisolve_dsygvd, f64, f64);
capi_sygvd!(unisolve_chegvd_buffer_size, unisolve_chegvd, Complex32, f32);
capi_sygvd!(unisolve_zhegvd_buffer_size, unisolve_zhegvd, Complex64, f64);

// ----------------------------------------------------------------------
// gesvd
// ----------------------------------------------------------------------

macro_rules! capi_gesvd {
    ($ws:ident, $exec:ident, $t:ty, $rt:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $ws(
            handle: u64,
            jobu: i8,
            jobv: i8,
            m: i32,
            n: i32,
            lda: i32,
            ldu: i32,
            ldv: i32,
            lwork: *mut i32,
        ) -> i32 {
            wrap(|| {
                non_null(lwork, "lwork")?;
                let p = GesvdParams {
                    jobu: svd_job_arg(jobu)?,
                    jobv: svd_job_arg(jobv)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    ldu: udim(ldu, "ldu")?,
                    ldv: udim(ldv, "ldv")?,
                };
                let size = with_session(handle, |s| s.solver.gesvd_workspace::<$t>(p))?;
                unsafe { write_size(lwork, size) }
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $exec(
            handle: u64,
            jobu: i8,
            jobv: i8,
            m: i32,
            n: i32,
            a: *mut $t,
            lda: i32,
            s: *mut $rt,
            u: *mut $t,
            ldu: i32,
            vt: *mut $t,
            ldv: i32,
            work: *mut $t,
            lwork: i32,
            rwork: *mut $rt,
            info: *mut i32,
        ) -> i32 {
            wrap(|| {
                let p = GesvdParams {
                    jobu: svd_job_arg(jobu)?,
                    jobv: svd_job_arg(jobv)?,
                    m: udim(m, "m")?,
                    n: udim(n, "n")?,
                    lda: udim(lda, "lda")?,
                    ldu: udim(ldu, "ldu")?,
                    ldv: udim(ldv, "ldv")?,
                };
                non_null(a, "a")?;
                non_null(s, "s")?;
                non_null(info, "info")?;
                let want_u = matches!(p.jobu, SvdJob::All | SvdJob::Thin);
                let want_v = matches!(p.jobv, SvdJob::All | SvdJob::Thin);
                if want_u {
                    non_null(u, "u")?;
                }
                if want_v {
                    non_null(vt, "vt")?;
                }
                let lwork = udim(lwork, "lwork")?;
                let _ = (work, rwork);
                let (a, s_out, u, vt, info) = (
                    SendMut::new(a),
                    SendMut::new(s),
                    SendMut::new(u),
                    SendMut::new(vt),
                    SendMut::new(info),
                );
                with_session(handle, |sess| {
                    let required = sess.solver.gesvd_workspace::<$t>(p)?;
                    check_lwork(lwork, required)?;
                    let min_mn = p.min_mn();
                    let a_len = p.a_len();
                    let u_len = if want_u {
                        let cols = if p.jobu == SvdJob::All { p.m } else { min_mn };
                        unisolve_core::params::required_len(p.m, cols, p.ldu)
                    } else {
                        0
                    };
                    let vt_len = if want_v {
                        let rows = if p.jobv == SvdJob::All { p.n } else { min_mn };
                        unisolve_core::params::required_len(rows, p.n, p.ldv)
                    } else {
                        0
                    };
                    sess.solver.queue().submit(move || {
                        let code = routines::svd::gesvd::<$t>(
                            p,
                            unsafe { slice_mut(a.get(), a_len) },
                            unsafe { slice_mut(s_out.get(), min_mn) },
                            unsafe { slice_mut(u.get(), u_len) },
                            unsafe { slice_mut(vt.get(), vt_len) },
                        );
                        unsafe { info.get().write(code) };
                    })
                })
            })
        }
    };
}

capi_gesvd!(unisolve_sgesvd_buffer_size, unisolve_sgesvd, f32, f32);
capi_gesvd!(unisolve_dgesvd_buffer_size, unisolve_dgesvd, f64, f64);
capi_gesvd!(unisolve_cgesvd_buffer_size, unisolve_cgesvd, Complex32, f32);
capi_gesvd!(unisolve_zgesvd_buffer_size, unisolve_zgesvd, Complex64, f64);
