//! End-to-end tests of the two-phase calling convention on the reference
//! backend.

use std::sync::Arc;

use unisolve_backend_cpu::{CpuBuf, CpuDenseSolver, CpuQueue};
use unisolve_core::params::{GetrfParams, PotrfBatchedParams, PotrfParams, SyevdParams};
use unisolve_core::{EigMode, FillMode, Status};

/// Column-major copy of [[12, -51, 4], [6, 167, -68], [-4, 24, -41]].
fn example_matrix() -> Vec<f64> {
    vec![12.0, 6.0, -4.0, -51.0, 167.0, 24.0, 4.0, -68.0, -41.0]
}

#[test]
fn lu_round_trip_reconstructs_the_input() {
    let solver = CpuDenseSolver::new().unwrap();
    let p = GetrfParams { m: 3, n: 3, lda: 3 };

    let lwork = solver.getrf_workspace::<f64>(p).unwrap();
    let a = CpuBuf::from_host(&example_matrix());
    let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
    let ipiv: CpuBuf<i32> = CpuBuf::zeros(3);
    let info: CpuBuf<i32> = CpuBuf::zeros(1);

    solver.getrf(p, &a, &work, lwork, &ipiv, &info).unwrap();
    solver.synchronize().unwrap();

    assert_eq!(info.to_host()[0], 0);

    // Undo the factorization on the host: P^T L U must equal the input.
    let f = a.to_host();
    let piv = ipiv.to_host();
    let orig = example_matrix();

    // rows[i] = which original row ended up in slot i.
    let mut rows: Vec<usize> = (0..3).collect();
    for (k, &pv) in piv.iter().enumerate() {
        rows.swap(k, (pv - 1) as usize);
    }

    for i in 0..3 {
        for j in 0..3 {
            let mut lu = 0.0;
            for k in 0..3 {
                let lik = if k < i {
                    f[k * 3 + i]
                } else if k == i {
                    1.0
                } else {
                    0.0
                };
                let ukj = if k <= j { f[j * 3 + k] } else { 0.0 };
                lu += lik * ukj;
            }
            let pa = orig[j * 3 + rows[i]];
            assert!((lu - pa).abs() < 1e-10, "mismatch at ({i}, {j})");
        }
    }
}

#[test]
fn workspace_query_is_pure_and_deterministic() {
    let solver = CpuDenseSolver::new().unwrap();
    let p = SyevdParams {
        jobz: EigMode::Vectors,
        uplo: FillMode::Upper,
        n: 17,
        lda: 20,
    };
    let first = solver.syevd_workspace::<f64>(p).unwrap();
    for _ in 0..8 {
        assert_eq!(solver.syevd_workspace::<f64>(p).unwrap(), first);
    }
    // The query enqueues nothing.
    solver.synchronize().unwrap();
}

#[test]
fn batched_cholesky_isolates_the_failing_element() {
    let solver = CpuDenseSolver::new().unwrap();
    let n = 2;
    let p = PotrfBatchedParams {
        uplo: FillMode::Lower,
        n,
        lda: n,
        batch: 3,
    };

    let spd = vec![4.0, 1.0, 1.0, 3.0];
    let indefinite = vec![1.0, 2.0, 2.0, 1.0]; // 2x2 minor is negative
    let mats = [
        CpuBuf::from_host(&spd),
        CpuBuf::from_host(&indefinite),
        CpuBuf::from_host(&spd),
    ];

    let lwork = solver.potrf_batched_workspace::<f64>(p).unwrap();
    let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
    let info: CpuBuf<i32> = CpuBuf::zeros(3);

    // The call itself succeeds; the per-element verdicts are in the slots.
    solver.potrf_batched(p, &mats, &work, lwork, &info).unwrap();
    solver.synchronize().unwrap();

    let codes = info.to_host();
    assert_eq!(codes[0], 0);
    assert_eq!(codes[1], 2);
    assert_eq!(codes[2], 0);

    // The healthy elements were factored: a[0] holds sqrt(4).
    assert!((mats[0].to_host()[0] - 2.0).abs() < 1e-12);
    assert!((mats[2].to_host()[0] - 2.0).abs() < 1e-12);
    // The failing element is untouched.
    assert_eq!(mats[1].to_host(), indefinite);
}

#[test]
fn rebinding_the_queue_does_not_change_results() {
    let mut solver = CpuDenseSolver::new().unwrap();
    let p = PotrfParams {
        uplo: FillMode::Lower,
        n: 2,
        lda: 2,
    };
    let lwork = solver.potrf_workspace::<f64>(p).unwrap();
    let work: CpuBuf<f64> = CpuBuf::zeros(lwork);

    let a1 = CpuBuf::from_host(&[4.0, 2.0, 2.0, 3.0]);
    let info1: CpuBuf<i32> = CpuBuf::zeros(1);
    solver.potrf(p, &a1, &work, lwork, &info1).unwrap();
    solver.synchronize().unwrap();

    let other = Arc::new(CpuQueue::new().unwrap());
    solver.set_queue(Arc::clone(&other));

    let a2 = CpuBuf::from_host(&[4.0, 2.0, 2.0, 3.0]);
    let info2: CpuBuf<i32> = CpuBuf::zeros(1);
    solver.potrf(p, &a2, &work, lwork, &info2).unwrap();
    solver.synchronize().unwrap();

    assert_eq!(info1.to_host(), info2.to_host());
    let (r1, r2) = (a1.to_host(), a2.to_host());
    for (x, y) in r1.iter().zip(&r2) {
        assert!((x - y).abs() < 1e-15);
    }
}

#[test]
fn calls_on_one_queue_execute_in_enqueue_order() {
    // Factor, then solve with the factorization, without synchronizing in
    // between. FIFO ordering makes the solve see the factored buffer.
    let solver = CpuDenseSolver::new().unwrap();
    let pf = GetrfParams { m: 2, n: 2, lda: 2 };
    let lwork = solver.getrf_workspace::<f64>(pf).unwrap();

    let a = CpuBuf::from_host(&[2.0, 1.0, 1.0, 3.0]);
    let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
    let ipiv: CpuBuf<i32> = CpuBuf::zeros(2);
    let info: CpuBuf<i32> = CpuBuf::zeros(1);
    solver.getrf(pf, &a, &work, lwork, &ipiv, &info).unwrap();

    let ps = unisolve_core::params::GetrsParams {
        trans: unisolve_core::Op::None,
        n: 2,
        nrhs: 1,
        lda: 2,
        ldb: 2,
    };
    let b = CpuBuf::from_host(&[5.0, 5.0]);
    let lwork_s = solver.getrs_workspace::<f64>(ps).unwrap();
    let work_s: CpuBuf<f64> = CpuBuf::zeros(lwork_s);
    let info_s: CpuBuf<i32> = CpuBuf::zeros(1);
    solver
        .getrs(ps, &a, &ipiv, &b, &work_s, lwork_s, &info_s)
        .unwrap();

    solver.synchronize().unwrap();
    let x = b.to_host();
    assert!((x[0] - 2.0).abs() < 1e-12);
    assert!((x[1] - 1.0).abs() < 1e-12);
}

#[test]
fn complex_hermitian_eigenvalues_are_real_and_sorted() {
    use num_complex::Complex64;

    let solver = CpuDenseSolver::new().unwrap();
    let n = 2;
    let p = SyevdParams {
        jobz: EigMode::NoVectors,
        uplo: FillMode::Lower,
        n,
        lda: n,
    };

    // [[2, i], [-i, 2]]: eigenvalues 1 and 3.
    let a = CpuBuf::from_host(&[
        Complex64::new(2.0, 0.0),
        Complex64::new(0.0, -1.0),
        Complex64::new(0.0, 0.0), // upper part unread in lower mode
        Complex64::new(2.0, 0.0),
    ]);
    let d: CpuBuf<f64> = CpuBuf::zeros(n);
    let lwork = solver.syevd_workspace::<Complex64>(p).unwrap();
    let work: CpuBuf<Complex64> = CpuBuf::zeros(lwork);
    let info: CpuBuf<i32> = CpuBuf::zeros(1);

    solver.syevd(p, &a, &d, &work, lwork, &info).unwrap();
    solver.synchronize().unwrap();

    assert_eq!(info.to_host()[0], 0);
    let vals = d.to_host();
    assert!((vals[0] - 1.0).abs() < 1e-10);
    assert!((vals[1] - 3.0).abs() < 1e-10);
}

#[test]
fn algorithmic_failure_is_not_a_protocol_failure() {
    let solver = CpuDenseSolver::new().unwrap();
    let p = GetrfParams { m: 2, n: 2, lda: 2 };
    let lwork = solver.getrf_workspace::<f64>(p).unwrap();

    // Singular input: the call still succeeds, the slot carries the verdict.
    let a = CpuBuf::from_host(&[1.0, 1.0, 2.0, 2.0]);
    let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
    let ipiv: CpuBuf<i32> = CpuBuf::zeros(2);
    let info: CpuBuf<i32> = CpuBuf::zeros(1);

    let outcome = solver.getrf(p, &a, &work, lwork, &ipiv, &info);
    assert!(outcome.is_ok());
    solver.synchronize().unwrap();
    assert_eq!(info.to_host()[0], 2);
}

#[test]
fn invalid_shape_is_synchronous_invalid_value() {
    let solver = CpuDenseSolver::new().unwrap();
    let p = GetrfParams { m: 8, n: 4, lda: 2 };
    let err = solver.getrf_workspace::<f32>(p).unwrap_err();
    assert_eq!(err.status(), Status::InvalidValue);
}
