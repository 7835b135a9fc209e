//! Per-scalar dispatch onto the cuSOLVER dense entry points, and the
//! translation of the vendor's enums and status codes into the protocol's
//! vocabulary.

use cudarc::cusolver::sys;
use cudarc::driver::{DeviceRepr, ValidAsZeroBits};
use std::os::raw::c_schar;

use unisolve_core::{EigMode, EigType, Error, FillMode, Op, Result, Scalar, Side};

use crate::complex::{GpuComplex32, GpuComplex64};

/// Map a vendor status onto the protocol's closed set.
///
/// Anything outside the known mapping becomes the unknown error carrying
/// the raw code for diagnostics; the code itself is never propagated as a
/// status.
pub(crate) fn check(status: sys::cusolverStatus_t, what: &str) -> Result<()> {
    use sys::cusolverStatus_t as S;
    match status {
        S::CUSOLVER_STATUS_SUCCESS => Ok(()),
        S::CUSOLVER_STATUS_NOT_INITIALIZED => Err(Error::NotInitialized),
        S::CUSOLVER_STATUS_ALLOC_FAILED => Err(Error::AllocFailed(what.to_string())),
        S::CUSOLVER_STATUS_INVALID_VALUE => Err(Error::InvalidValue(what.to_string())),
        S::CUSOLVER_STATUS_ARCH_MISMATCH => Err(Error::ArchMismatch),
        S::CUSOLVER_STATUS_MAPPING_ERROR => Err(Error::MappingError(what.to_string())),
        S::CUSOLVER_STATUS_EXECUTION_FAILED => Err(Error::ExecutionFailed(what.to_string())),
        S::CUSOLVER_STATUS_INTERNAL_ERROR => Err(Error::InternalError(what.to_string())),
        S::CUSOLVER_STATUS_MATRIX_TYPE_NOT_SUPPORTED => Err(Error::NotSupported(what.to_string())),
        other => {
            log::warn!("{what}: unrecognized backend status {other:?}");
            Err(Error::Unknown { code: other as i32 })
        }
    }
}

pub(crate) fn fill_mode(uplo: FillMode) -> sys::cublasFillMode_t {
    match uplo {
        FillMode::Upper => sys::cublasFillMode_t::CUBLAS_FILL_MODE_UPPER,
        FillMode::Lower => sys::cublasFillMode_t::CUBLAS_FILL_MODE_LOWER,
    }
}

pub(crate) fn operation(trans: Op) -> sys::cublasOperation_t {
    match trans {
        Op::None => sys::cublasOperation_t::CUBLAS_OP_N,
        Op::Transpose => sys::cublasOperation_t::CUBLAS_OP_T,
        Op::ConjTranspose => sys::cublasOperation_t::CUBLAS_OP_C,
    }
}

pub(crate) fn side_mode(side: Side) -> sys::cublasSideMode_t {
    match side {
        Side::Left => sys::cublasSideMode_t::CUBLAS_SIDE_LEFT,
        Side::Right => sys::cublasSideMode_t::CUBLAS_SIDE_RIGHT,
    }
}

pub(crate) fn eig_mode(jobz: EigMode) -> sys::cusolverEigMode_t {
    match jobz {
        EigMode::NoVectors => sys::cusolverEigMode_t::CUSOLVER_EIG_MODE_NOVECTOR,
        EigMode::Vectors => sys::cusolverEigMode_t::CUSOLVER_EIG_MODE_VECTOR,
    }
}

pub(crate) fn eig_type(itype: EigType) -> sys::cusolverEigType_t {
    match itype {
        EigType::Type1 => sys::cusolverEigType_t::CUSOLVER_EIG_TYPE_1,
        EigType::Type2 => sys::cusolverEigType_t::CUSOLVER_EIG_TYPE_2,
        EigType::Type3 => sys::cusolverEigType_t::CUSOLVER_EIG_TYPE_3,
    }
}

type H = sys::cusolverDnHandle_t;
type St = sys::cusolverStatus_t;

/// One scalar instantiation of the routine set.
///
/// `Dev` is the device-side element type and `DevReal` its real
/// counterpart (eigenvalues, singular values, tridiagonal coefficients).
/// Each method is a direct call into the matching `cusolverDn` symbol;
/// pointer arguments are raw device pointers.
#[allow(clippy::too_many_arguments, clippy::missing_safety_doc)]
pub trait CudaScalar: Scalar {
    type Dev: DeviceRepr + ValidAsZeroBits + Copy + Default + Send + Sync + 'static;
    type DevReal: DeviceRepr + ValidAsZeroBits + Copy + Default + Send + Sync + 'static;

    unsafe fn getrf_buffer_size(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, lwork: *mut i32) -> St;
    unsafe fn getrf(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, work: *mut Self::Dev, ipiv: *mut i32, info: *mut i32) -> St;
    unsafe fn getrs(h: H, trans: sys::cublasOperation_t, n: i32, nrhs: i32, a: *mut Self::Dev, lda: i32, ipiv: *mut i32, b: *mut Self::Dev, ldb: i32, info: *mut i32) -> St;

    unsafe fn potrf_buffer_size(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, lwork: *mut i32) -> St;
    unsafe fn potrf(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn potrf_batched(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut *mut Self::Dev, lda: i32, info: *mut i32, batch: i32) -> St;

    unsafe fn geqrf_buffer_size(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, lwork: *mut i32) -> St;
    unsafe fn geqrf(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn orgqr_buffer_size(h: H, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, lwork: *mut i32) -> St;
    unsafe fn orgqr(h: H, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn ormqr_buffer_size(h: H, side: sys::cublasSideMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, lwork: *mut i32) -> St;
    unsafe fn ormqr(h: H, side: sys::cublasSideMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;

    unsafe fn gebrd_buffer_size(h: H, m: i32, n: i32, lwork: *mut i32) -> St;
    unsafe fn gebrd(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, d: *mut Self::DevReal, e: *mut Self::DevReal, tauq: *mut Self::Dev, taup: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn orgbr_buffer_size(h: H, side: sys::cublasSideMode_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, lwork: *mut i32) -> St;
    unsafe fn orgbr(h: H, side: sys::cublasSideMode_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;

    unsafe fn sytrd_buffer_size(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, d: *mut Self::DevReal, e: *mut Self::DevReal, tau: *mut Self::Dev, lwork: *mut i32) -> St;
    unsafe fn sytrd(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, d: *mut Self::DevReal, e: *mut Self::DevReal, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn orgtr_buffer_size(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, lwork: *mut i32) -> St;
    unsafe fn orgtr(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn ormtr_buffer_size(h: H, side: sys::cublasSideMode_t, uplo: sys::cublasFillMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, lwork: *mut i32) -> St;
    unsafe fn ormtr(h: H, side: sys::cublasSideMode_t, uplo: sys::cublasFillMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;

    unsafe fn syevd_buffer_size(h: H, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, w: *mut Self::DevReal, lwork: *mut i32) -> St;
    unsafe fn syevd(h: H, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, w: *mut Self::DevReal, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;
    unsafe fn sygvd_buffer_size(h: H, itype: sys::cusolverEigType_t, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, b: *mut Self::Dev, ldb: i32, w: *mut Self::DevReal, lwork: *mut i32) -> St;
    unsafe fn sygvd(h: H, itype: sys::cusolverEigType_t, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, b: *mut Self::Dev, ldb: i32, w: *mut Self::DevReal, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St;

    unsafe fn gesvd_buffer_size(h: H, m: i32, n: i32, lwork: *mut i32) -> St;
    unsafe fn gesvd(h: H, jobu: c_schar, jobv: c_schar, m: i32, n: i32, a: *mut Self::Dev, lda: i32, s: *mut Self::DevReal, u: *mut Self::Dev, ldu: i32, vt: *mut Self::Dev, ldvt: i32, work: *mut Self::Dev, lwork: i32, rwork: *mut Self::DevReal, info: *mut i32) -> St;
}

macro_rules! cuda_scalar {
    ($t:ty, $dev:ty, $devreal:ty,
     $getrf_bs:ident, $getrf:ident, $getrs:ident,
     $potrf_bs:ident, $potrf:ident, $potrf_batched:ident,
     $geqrf_bs:ident, $geqrf:ident, $orgqr_bs:ident, $orgqr:ident, $ormqr_bs:ident, $ormqr:ident,
     $gebrd_bs:ident, $gebrd:ident, $orgbr_bs:ident, $orgbr:ident,
     $sytrd_bs:ident, $sytrd:ident, $orgtr_bs:ident, $orgtr:ident, $ormtr_bs:ident, $ormtr:ident,
     $syevd_bs:ident, $syevd:ident, $sygvd_bs:ident, $sygvd:ident,
     $gesvd_bs:ident, $gesvd:ident) => {
        #[allow(clippy::too_many_arguments)]
        impl CudaScalar for $t {
            type Dev = $dev;
            type DevReal = $devreal;

            unsafe fn getrf_buffer_size(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, lwork: *mut i32) -> St {
                unsafe { sys::$getrf_bs(h, m, n, a as _, lda, lwork) }
            }
            unsafe fn getrf(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, work: *mut Self::Dev, ipiv: *mut i32, info: *mut i32) -> St {
                unsafe { sys::$getrf(h, m, n, a as _, lda, work as _, ipiv, info) }
            }
            unsafe fn getrs(h: H, trans: sys::cublasOperation_t, n: i32, nrhs: i32, a: *mut Self::Dev, lda: i32, ipiv: *mut i32, b: *mut Self::Dev, ldb: i32, info: *mut i32) -> St {
                unsafe { sys::$getrs(h, trans, n, nrhs, a as _, lda, ipiv, b as _, ldb, info) }
            }

            unsafe fn potrf_buffer_size(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, lwork: *mut i32) -> St {
                unsafe { sys::$potrf_bs(h, uplo, n, a as _, lda, lwork) }
            }
            unsafe fn potrf(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$potrf(h, uplo, n, a as _, lda, work as _, lwork, info) }
            }
            unsafe fn potrf_batched(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut *mut Self::Dev, lda: i32, info: *mut i32, batch: i32) -> St {
                unsafe { sys::$potrf_batched(h, uplo, n, a as _, lda, info, batch) }
            }

            unsafe fn geqrf_buffer_size(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, lwork: *mut i32) -> St {
                unsafe { sys::$geqrf_bs(h, m, n, a as _, lda, lwork) }
            }
            unsafe fn geqrf(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$geqrf(h, m, n, a as _, lda, tau as _, work as _, lwork, info) }
            }
            unsafe fn orgqr_buffer_size(h: H, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, lwork: *mut i32) -> St {
                unsafe { sys::$orgqr_bs(h, m, n, k, a as _, lda, tau as _, lwork) }
            }
            unsafe fn orgqr(h: H, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$orgqr(h, m, n, k, a as _, lda, tau as _, work as _, lwork, info) }
            }
            unsafe fn ormqr_buffer_size(h: H, side: sys::cublasSideMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, lwork: *mut i32) -> St {
                unsafe { sys::$ormqr_bs(h, side, trans, m, n, k, a as _, lda, tau as _, c as _, ldc, lwork) }
            }
            unsafe fn ormqr(h: H, side: sys::cublasSideMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$ormqr(h, side, trans, m, n, k, a as _, lda, tau as _, c as _, ldc, work as _, lwork, info) }
            }

            unsafe fn gebrd_buffer_size(h: H, m: i32, n: i32, lwork: *mut i32) -> St {
                unsafe { sys::$gebrd_bs(h, m, n, lwork) }
            }
            unsafe fn gebrd(h: H, m: i32, n: i32, a: *mut Self::Dev, lda: i32, d: *mut Self::DevReal, e: *mut Self::DevReal, tauq: *mut Self::Dev, taup: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$gebrd(h, m, n, a as _, lda, d as _, e as _, tauq as _, taup as _, work as _, lwork, info) }
            }
            unsafe fn orgbr_buffer_size(h: H, side: sys::cublasSideMode_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, lwork: *mut i32) -> St {
                unsafe { sys::$orgbr_bs(h, side, m, n, k, a as _, lda, tau as _, lwork) }
            }
            unsafe fn orgbr(h: H, side: sys::cublasSideMode_t, m: i32, n: i32, k: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$orgbr(h, side, m, n, k, a as _, lda, tau as _, work as _, lwork, info) }
            }

            unsafe fn sytrd_buffer_size(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, d: *mut Self::DevReal, e: *mut Self::DevReal, tau: *mut Self::Dev, lwork: *mut i32) -> St {
                unsafe { sys::$sytrd_bs(h, uplo, n, a as _, lda, d as _, e as _, tau as _, lwork) }
            }
            unsafe fn sytrd(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, d: *mut Self::DevReal, e: *mut Self::DevReal, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$sytrd(h, uplo, n, a as _, lda, d as _, e as _, tau as _, work as _, lwork, info) }
            }
            unsafe fn orgtr_buffer_size(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, lwork: *mut i32) -> St {
                unsafe { sys::$orgtr_bs(h, uplo, n, a as _, lda, tau as _, lwork) }
            }
            unsafe fn orgtr(h: H, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$orgtr(h, uplo, n, a as _, lda, tau as _, work as _, lwork, info) }
            }
            unsafe fn ormtr_buffer_size(h: H, side: sys::cublasSideMode_t, uplo: sys::cublasFillMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, lwork: *mut i32) -> St {
                unsafe { sys::$ormtr_bs(h, side, uplo, trans, m, n, a as _, lda, tau as _, c as _, ldc, lwork) }
            }
            unsafe fn ormtr(h: H, side: sys::cublasSideMode_t, uplo: sys::cublasFillMode_t, trans: sys::cublasOperation_t, m: i32, n: i32, a: *mut Self::Dev, lda: i32, tau: *mut Self::Dev, c: *mut Self::Dev, ldc: i32, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$ormtr(h, side, uplo, trans, m, n, a as _, lda, tau as _, c as _, ldc, work as _, lwork, info) }
            }

            unsafe fn syevd_buffer_size(h: H, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, w: *mut Self::DevReal, lwork: *mut i32) -> St {
                unsafe { sys::$syevd_bs(h, jobz, uplo, n, a as _, lda, w as _, lwork) }
            }
            unsafe fn syevd(h: H, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, w: *mut Self::DevReal, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$syevd(h, jobz, uplo, n, a as _, lda, w as _, work as _, lwork, info) }
            }
            unsafe fn sygvd_buffer_size(h: H, itype: sys::cusolverEigType_t, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, b: *mut Self::Dev, ldb: i32, w: *mut Self::DevReal, lwork: *mut i32) -> St {
                unsafe { sys::$sygvd_bs(h, itype, jobz, uplo, n, a as _, lda, b as _, ldb, w as _, lwork) }
            }
            unsafe fn sygvd(h: H, itype: sys::cusolverEigType_t, jobz: sys::cusolverEigMode_t, uplo: sys::cublasFillMode_t, n: i32, a: *mut Self::Dev, lda: i32, b: *mut Self::Dev, ldb: i32, w: *mut Self::DevReal, work: *mut Self::Dev, lwork: i32, info: *mut i32) -> St {
                unsafe { sys::$sygvd(h, itype, jobz, uplo, n, a as _, lda, b as _, ldb, w as _, work as _, lwork, info) }
            }

            unsafe fn gesvd_buffer_size(h: H, m: i32, n: i32, lwork: *mut i32) -> St {
                unsafe { sys::$gesvd_bs(h, m, n, lwork) }
            }
            unsafe fn gesvd(h: H, jobu: c_schar, jobv: c_schar, m: i32, n: i32, a: *mut Self::Dev, lda: i32, s: *mut Self::DevReal, u: *mut Self::Dev, ldu: i32, vt: *mut Self::Dev, ldvt: i32, work: *mut Self::Dev, lwork: i32, rwork: *mut Self::DevReal, info: *mut i32) -> St {
                unsafe { sys::$gesvd(h, jobu, jobv, m, n, a as _, lda, s as _, u as _, ldu, vt as _, ldvt, work as _, lwork, rwork as _, info) }
            }
        }
    };
}

cuda_scalar!(
    f32, f32, f32,
    cusolverDnSgetrf_bufferSize, cusolverDnSgetrf, cusolverDnSgetrs,
    cusolverDnSpotrf_bufferSize, cusolverDnSpotrf, cusolverDnSpotrfBatched,
    cusolverDnSgeqrf_bufferSize, cusolverDnSgeqrf, cusolverDnSorgqr_bufferSize, cusolverDnSorgqr, cusolverDnSormqr_bufferSize, cusolverDnSormqr,
    cusolverDnSgebrd_bufferSize, cusolverDnSgebrd, cusolverDnSorgbr_bufferSize, cusolverDnSorgbr,
    cusolverDnSsytrd_bufferSize, cusolverDnSsytrd, cusolverDnSorgtr_bufferSize, cusolverDnSorgtr, cusolverDnSormtr_bufferSize, cusolverDnSormtr,
    cusolverDnSsyevd_bufferSize, cusolverDnSsyevd, cusolverDnSsygvd_bufferSize, cusolverDnSsygvd,
    cusolverDnSgesvd_bufferSize, cusolverDnSgesvd
);

cuda_scalar!(
    f64, f64, f64,
    cusolverDnDgetrf_bufferSize, cusolverDnDgetrf, cusolverDnDgetrs,
    cusolverDnDpotrf_bufferSize, cusolverDnDpotrf, cusolverDnDpotrfBatched,
    cusolverDnDgeqrf_bufferSize, cusolverDnDgeqrf, cusolverDnDorgqr_bufferSize, cusolverDnDorgqr, cusolverDnDormqr_bufferSize, cusolverDnDormqr,
    cusolverDnDgebrd_bufferSize, cusolverDnDgebrd, cusolverDnDorgbr_bufferSize, cusolverDnDorgbr,
    cusolverDnDsytrd_bufferSize, cusolverDnDsytrd, cusolverDnDorgtr_bufferSize, cusolverDnDorgtr, cusolverDnDormtr_bufferSize, cusolverDnDormtr,
    cusolverDnDsyevd_bufferSize, cusolverDnDsyevd, cusolverDnDsygvd_bufferSize, cusolverDnDsygvd,
    cusolverDnDgesvd_bufferSize, cusolverDnDgesvd
);

cuda_scalar!(
    num_complex::Complex32, GpuComplex32, f32,
    cusolverDnCgetrf_bufferSize, cusolverDnCgetrf, cusolverDnCgetrs,
    cusolverDnCpotrf_bufferSize, cusolverDnCpotrf, cusolverDnCpotrfBatched,
    cusolverDnCgeqrf_bufferSize, cusolverDnCgeqrf, cusolverDnCungqr_bufferSize, cusolverDnCungqr, cusolverDnCunmqr_bufferSize, cusolverDnCunmqr,
    cusolverDnCgebrd_bufferSize, cusolverDnCgebrd, cusolverDnCungbr_bufferSize, cusolverDnCungbr,
    cusolverDnChetrd_bufferSize, cusolverDnChetrd, cusolverDnCungtr_bufferSize, cusolverDnCungtr, cusolverDnCunmtr_bufferSize, cusolverDnCunmtr,
    cusolverDnCheevd_bufferSize, cusolverDnCheevd, cusolverDnChegvd_bufferSize, cusolverDnChegvd,
    cusolverDnCgesvd_bufferSize, cusolverDnCgesvd
);

cuda_scalar!(
    num_complex::Complex64, GpuComplex64, f64,
    cusolverDnZgetrf_bufferSize, cusolverDnZgetrf, cusolverDnZgetrs,
    cusolverDnZpotrf_bufferSize, cusolverDnZpotrf, cusolverDnZpotrfBatched,
    cusolverDnZgeqrf_bufferSize, cusolverDnZgeqrf, cusolverDnZungqr_bufferSize, cusolverDnZungqr, cusolverDnZunmqr_bufferSize, cusolverDnZunmqr,
    cusolverDnZgebrd_bufferSize, cusolverDnZgebrd, cusolverDnZungbr_bufferSize, cusolverDnZungbr,
    cusolverDnZhetrd_bufferSize, cusolverDnZhetrd, cusolverDnZungtr_bufferSize, cusolverDnZungtr, cusolverDnZunmtr_bufferSize, cusolverDnZunmtr,
    cusolverDnZheevd_bufferSize, cusolverDnZheevd, cusolverDnZhegvd_bufferSize, cusolverDnZhegvd,
    cusolverDnZgesvd_bufferSize, cusolverDnZgesvd
);
