//! Exercises the C surface the way a foreign caller would: raw pointers,
//! raw enum integers, raw status codes.

use unisolve_capi::*;

const SUCCESS: i32 = 0;
const NOT_SUPPORTED: i32 = 7;
const NULL_HANDLE: i32 = 9;
const INVALID_ENUM: i32 = 10;

const FILL_LOWER: i32 = 122;

fn create() -> u64 {
    let mut handle = 0u64;
    assert_eq!(unsafe { unisolve_create(&mut handle) }, SUCCESS);
    assert_ne!(handle, 0);
    handle
}

#[test]
fn destroyed_handle_fails_with_null_handle_status() {
    let handle = create();
    assert_eq!(unisolve_destroy(handle), SUCCESS);

    // Any call with the dead id must fail with the null-handle status
    // rather than produce undefined success.
    let mut lwork = -1;
    let status =
        unsafe { unisolve_dgetrf_buffer_size(handle, 3, 3, 3, &mut lwork) };
    assert_eq!(status, NULL_HANDLE);
    assert_eq!(lwork, -1);

    assert_eq!(unisolve_synchronize(handle), NULL_HANDLE);
    assert_eq!(unisolve_destroy(handle), NULL_HANDLE);
}

#[test]
fn zero_and_foreign_ids_are_rejected() {
    assert_eq!(unisolve_synchronize(0), NULL_HANDLE);
    assert_eq!(unisolve_synchronize(0xdead_beef), NULL_HANDLE);
}

#[test]
fn out_of_range_enum_leaves_workspace_unwritten() {
    let handle = create();
    let mut lwork = -1;
    // 123 is not a fill mode.
    let status = unsafe { unisolve_dpotrf_buffer_size(handle, 123, 4, 4, &mut lwork) };
    assert_eq!(status, INVALID_ENUM);
    assert_eq!(lwork, -1);
    unisolve_destroy(handle);
}

#[test]
fn lu_factorization_end_to_end() {
    let handle = create();

    let m = 3;
    // Column-major [[12, -51, 4], [6, 167, -68], [-4, 24, -41]].
    let orig = [12.0f64, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0];
    let mut a = orig;

    let mut lwork = 0;
    assert_eq!(
        unsafe { unisolve_dgetrf_buffer_size(handle, m, m, m, &mut lwork) },
        SUCCESS
    );
    assert!(lwork >= 0);

    let mut work = vec![0.0f64; lwork as usize];
    let mut ipiv = [0i32; 3];
    let mut info = [-1i32; 1];
    let status = unsafe {
        unisolve_dgetrf(
            handle,
            m,
            m,
            a.as_mut_ptr(),
            m,
            work.as_mut_ptr(),
            lwork,
            ipiv.as_mut_ptr(),
            info.as_mut_ptr(),
        )
    };
    assert_eq!(status, SUCCESS);
    assert_eq!(unisolve_synchronize(handle), SUCCESS);
    assert_eq!(info[0], 0);

    // Reconstruct P * A from the packed factors and pivot interchanges.
    let mut rows = [0usize, 1, 2];
    for (k, &p) in ipiv.iter().enumerate() {
        rows.swap(k, (p - 1) as usize);
    }
    for i in 0..3 {
        for j in 0..3 {
            let mut lu = 0.0;
            for k in 0..3 {
                let lik = if k < i {
                    a[k * 3 + i]
                } else if k == i {
                    1.0
                } else {
                    0.0
                };
                let ukj = if k <= j { a[j * 3 + k] } else { 0.0 };
                lu += lik * ukj;
            }
            assert!((lu - orig[j * 3 + rows[i]]).abs() < 1e-10);
        }
    }

    unisolve_destroy(handle);
}

#[test]
fn batched_cholesky_reports_per_element_verdicts() {
    let handle = create();
    let n = 2;

    let mut good1 = [4.0f64, 1.0, 1.0, 3.0];
    let mut bad = [1.0f64, 2.0, 2.0, 1.0];
    let mut good2 = [9.0f64, 0.0, 0.0, 1.0];
    let ptrs = [good1.as_mut_ptr(), bad.as_mut_ptr(), good2.as_mut_ptr()];

    let mut lwork = 0;
    assert_eq!(
        unsafe { unisolve_dpotrf_batched_buffer_size(handle, FILL_LOWER, n, n, &mut lwork, 3) },
        SUCCESS
    );
    let mut work = vec![0.0f64; (lwork as usize).max(1)];
    let mut info = [-1i32; 3];
    let status = unsafe {
        unisolve_dpotrf_batched(
            handle,
            FILL_LOWER,
            n,
            ptrs.as_ptr(),
            n,
            work.as_mut_ptr(),
            lwork,
            info.as_mut_ptr(),
            3,
        )
    };
    assert_eq!(status, SUCCESS);
    assert_eq!(unisolve_synchronize(handle), SUCCESS);

    assert_eq!(info[0], 0);
    assert_eq!(info[1], 2);
    assert_eq!(info[2], 0);
    // Healthy elements were factored in place.
    assert!((good1[0] - 2.0).abs() < 1e-12);
    assert!((good2[0] - 3.0).abs() < 1e-12);

    unisolve_destroy(handle);
}

#[test]
fn queue_rebinding_keeps_results() {
    let handle = create();

    let mut queue = 0u64;
    assert_eq!(unsafe { unisolve_queue_create(&mut queue) }, SUCCESS);
    assert_eq!(unisolve_set_queue(handle, queue), SUCCESS);

    let mut bound = 0u64;
    assert_eq!(unsafe { unisolve_get_queue(handle, &mut bound) }, SUCCESS);
    assert_eq!(bound, queue);

    // Work still runs, now on the new queue.
    let mut a = [4.0f64, 2.0, 2.0, 3.0];
    let mut lwork = 0;
    assert_eq!(
        unsafe { unisolve_dpotrf_buffer_size(handle, FILL_LOWER, 2, 2, &mut lwork) },
        SUCCESS
    );
    let mut work = vec![0.0f64; lwork as usize];
    let mut info = [-1i32];
    assert_eq!(
        unsafe {
            unisolve_dpotrf(
                handle,
                FILL_LOWER,
                2,
                a.as_mut_ptr(),
                2,
                work.as_mut_ptr(),
                lwork,
                info.as_mut_ptr(),
            )
        },
        SUCCESS
    );
    assert_eq!(unisolve_synchronize(handle), SUCCESS);
    assert_eq!(info[0], 0);
    assert!((a[0] - 2.0).abs() < 1e-12);

    unisolve_destroy(handle);
    assert_eq!(unisolve_queue_destroy(queue), SUCCESS);
}

#[test]
fn unsupported_routine_is_a_synchronous_status() {
    let handle = create();
    let mut lwork = -1;
    let status = unsafe { unisolve_dorgqr_buffer_size(handle, 4, 4, 4, 4, &mut lwork) };
    assert_eq!(status, NOT_SUPPORTED);
    assert_eq!(lwork, -1);
    unisolve_destroy(handle);
}
