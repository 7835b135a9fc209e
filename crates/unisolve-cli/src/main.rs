//! Unisolve command-line sample: LU factorization through the two-phase
//! calling convention.

use anyhow::{bail, Result};
use clap::Parser;
use unisolve::prelude::*;

#[derive(Parser)]
#[command(name = "unisolve")]
#[command(about = "LU factorization sample for the unisolve solver layer", long_about = None)]
#[command(version)]
struct Cli {
    /// Compute backend: auto, cpu, or cuda
    #[arg(long, default_value = "auto")]
    backend: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// A small example input; entry (i, j) lives at `a[i + j * lda]`.
fn example_matrix() -> (Vec<f64>, usize) {
    let a = [
        [12.0, -51.0, 4.0],
        [6.0, 167.0, -68.0],
        [-4.0, 24.0, -41.0],
    ];
    let n = 3;
    let mut col_major = vec![0.0; n * n];
    for (i, row) in a.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            col_major[i + j * n] = v;
        }
    }
    (col_major, n)
}

fn print_matrix(label: &str, data: &[f64], n: usize, map: impl Fn(usize, usize, f64) -> f64) {
    println!("{label} = [");
    for i in 0..n {
        print!(" ");
        for j in 0..n {
            print!(" {:8.3}", map(i, j, data[i + j * n]));
        }
        println!(" ;");
    }
    println!("]");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let backend = detect_backend(&cli.backend)?;
    if cli.verbose {
        println!("Backend: {backend}");
    }

    match backend {
        Backend::Cpu => run_cpu(&cli),
        Backend::Cuda { device_id } => run_cuda(&cli, device_id),
    }
}

fn detect_backend(name: &str) -> Result<Backend> {
    let Some(requested) = Backend::from_name(name) else {
        bail!("unknown backend {name:?}; expected auto, cpu, or cuda");
    };
    match requested {
        Backend::Cuda { device_id } => {
            #[cfg(feature = "cuda")]
            {
                if unisolve::CudaContext::is_available() {
                    return Ok(Backend::Cuda { device_id });
                }
                bail!("no CUDA device available");
            }
            #[cfg(not(feature = "cuda"))]
            {
                let _ = device_id;
                bail!("this build has no CUDA support; rebuild with --features cuda");
            }
        }
        Backend::Cpu => Ok(Backend::Cpu),
    }
}

fn report(a: &[f64], ipiv: &[i32], info: i32, n: usize) {
    if info != 0 {
        println!("matrix is singular: zero pivot at position {info}");
        return;
    }
    print_matrix("L", a, n, |i, j, v| {
        if i > j {
            v
        } else if i == j {
            1.0
        } else {
            0.0
        }
    });
    print_matrix("U", a, n, |i, j, v| if i <= j { v } else { 0.0 });
    let swaps: Vec<String> = ipiv
        .iter()
        .enumerate()
        .map(|(k, &p)| format!("{} <-> {}", k + 1, p))
        .collect();
    println!("row interchanges: {}", swaps.join(", "));
}

fn run_cpu(cli: &Cli) -> Result<()> {
    let (host_a, n) = example_matrix();
    print_matrix("A", &host_a, n, |_, _, v| v);

    let solver = CpuDenseSolver::new()?;
    let p = GetrfParams { m: n, n, lda: n };

    // Phase 1: size the scratch workspace for this configuration.
    let lwork = solver.getrf_workspace::<f64>(p)?;
    if cli.verbose {
        println!("workspace: {lwork} elements");
    }

    // Phase 2: enqueue the factorization, then synchronize before
    // reading the completion slot.
    let a = CpuBuf::from_host(&host_a);
    let work = CpuBuf::<f64>::zeros(lwork);
    let ipiv = CpuBuf::<i32>::zeros(n);
    let info = CpuBuf::<i32>::zeros(1);
    solver.getrf(p, &a, &work, lwork, &ipiv, &info)?;
    solver.synchronize()?;

    report(&a.to_host(), &ipiv.to_host(), info.to_host()[0], n);
    Ok(())
}

#[cfg(feature = "cuda")]
fn run_cuda(cli: &Cli, device_id: usize) -> Result<()> {
    use std::sync::Arc;

    let (host_a, n) = example_matrix();
    print_matrix("A", &host_a, n, |_, _, v| v);

    let ctx = Arc::new(unisolve::CudaContext::with_device(device_id)?);
    let stream = ctx.stream().clone();
    let solver = unisolve::CudaDenseSolver::new(ctx)?;
    let p = GetrfParams { m: n, n, lda: n };

    let mut a = stream
        .memcpy_stod(&host_a[..])
        .map_err(|e| anyhow::anyhow!("upload failed: {e}"))?;
    let lwork = solver.getrf_workspace::<f64>(p, &a)?;
    if cli.verbose {
        println!("workspace: {lwork} elements");
    }

    let mut work = stream
        .alloc_zeros::<f64>(lwork.max(1))
        .map_err(|e| anyhow::anyhow!("workspace allocation failed: {e}"))?;
    let mut ipiv = stream
        .alloc_zeros::<i32>(n)
        .map_err(|e| anyhow::anyhow!("pivot allocation failed: {e}"))?;
    let mut info = stream
        .alloc_zeros::<i32>(1)
        .map_err(|e| anyhow::anyhow!("info allocation failed: {e}"))?;

    solver.getrf::<f64>(p, &mut a, &mut work, &mut ipiv, &mut info)?;
    solver.synchronize()?;

    let factored = stream
        .memcpy_dtov(&a)
        .map_err(|e| anyhow::anyhow!("download failed: {e}"))?;
    let piv = stream
        .memcpy_dtov(&ipiv)
        .map_err(|e| anyhow::anyhow!("download failed: {e}"))?;
    let info_host = stream
        .memcpy_dtov(&info)
        .map_err(|e| anyhow::anyhow!("download failed: {e}"))?;

    report(&factored, &piv, info_host[0], n);
    Ok(())
}

#[cfg(not(feature = "cuda"))]
fn run_cuda(_cli: &Cli, _device_id: usize) -> Result<()> {
    bail!("this build has no CUDA support; rebuild with --features cuda");
}
