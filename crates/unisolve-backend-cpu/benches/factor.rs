//! Factorization throughput on the reference backend.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use unisolve_backend_cpu::{CpuBuf, CpuDenseSolver};
use unisolve_core::params::{GetrfParams, PotrfBatchedParams};
use unisolve_core::FillMode;

fn spd_matrix(n: usize) -> Vec<f64> {
    // Diagonally dominant, hence positive definite.
    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            a[j * n + i] = if i == j { n as f64 + 1.0 } else { 1.0 / (1.0 + (i + j) as f64) };
        }
    }
    a
}

fn bench_getrf(c: &mut Criterion) {
    let mut group = c.benchmark_group("getrf");
    for n in [16usize, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            let solver = CpuDenseSolver::new().unwrap();
            let p = GetrfParams { m: n, n, lda: n };
            let lwork = solver.getrf_workspace::<f64>(p).unwrap();
            let data = spd_matrix(n);
            let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
            let ipiv: CpuBuf<i32> = CpuBuf::zeros(n);
            let info: CpuBuf<i32> = CpuBuf::zeros(1);
            bench.iter(|| {
                let a = CpuBuf::from_host(&data);
                solver.getrf(p, &a, &work, lwork, &ipiv, &info).unwrap();
                solver.synchronize().unwrap();
            });
        });
    }
    group.finish();
}

fn bench_potrf_batched(c: &mut Criterion) {
    let mut group = c.benchmark_group("potrf_batched");
    for batch in [8usize, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |bench, &batch| {
            let solver = CpuDenseSolver::new().unwrap();
            let n = 32;
            let p = PotrfBatchedParams {
                uplo: FillMode::Lower,
                n,
                lda: n,
                batch,
            };
            let lwork = solver.potrf_batched_workspace::<f64>(p).unwrap();
            let data = spd_matrix(n);
            let work: CpuBuf<f64> = CpuBuf::zeros(lwork);
            let info: CpuBuf<i32> = CpuBuf::zeros(batch);
            bench.iter(|| {
                let mats: Vec<CpuBuf<f64>> =
                    (0..batch).map(|_| CpuBuf::from_host(&data)).collect();
                solver.potrf_batched(p, &mats, &work, lwork, &info).unwrap();
                solver.synchronize().unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_getrf, bench_potrf_batched);
criterion_main!(benches);
