//! Benchmark runner: ties together sampling, spline construction, and quadrature.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use batten_compute::{ComputeBackend, CpuBackend, SerialBackend};
use batten_core::grid::{sample, uniform_grid};
use batten_core::quadrature::Integrator;
use batten_core::spline::SplineBuilder;

use crate::config::JobConfig;
use crate::functions;

/// One timed build-and-integrate run.
#[derive(Debug, Serialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub elapsed_ns: u128,
    pub integral: f64,
}

/// Results from a benchmark run.
#[derive(Debug, Serialize)]
pub struct BenchmarkOutput {
    pub function: String,
    pub nodes: usize,
    pub subintervals: usize,
    pub backend: String,
    /// Exact integral over the domain, when the built-in provides one.
    pub analytic: Option<f64>,
    pub trials: Vec<TrialRecord>,
}

/// Run a full benchmark from a parsed job configuration.
///
/// Samples the configured function on a uniform grid once, then per trial
/// times spline construction plus quadrature with [`Instant`]. Each trial
/// is independent; only this (single-process) coordinator prints.
pub fn run_benchmark(job: &JobConfig) -> Result<BenchmarkOutput> {
    let function = functions::lookup(&job.function.name)
        .with_context(|| format!("Unknown function '{}'", job.function.name))?;
    let [a, b] = job.grid.domain;

    let nodes = uniform_grid(a, b, job.grid.nodes);
    let values = sample(|x| function.evaluate(x), &nodes);
    println!(
        "  Function '{}': {} nodes on [{}, {}]",
        function.name, job.grid.nodes, a, b
    );

    let backend = create_backend(&job.benchmark.backend);
    let backend_name = backend.device_info().name;

    let builder = SplineBuilder::with_backend(backend.clone());
    let integrator = Integrator::with_backend(backend);

    let num_trials = job.benchmark.trials;
    let mut trials = Vec::with_capacity(num_trials);
    for trial in 1..=num_trials {
        let start = Instant::now();
        let spline = builder
            .build(nodes.clone(), values.clone())
            .context("Spline construction failed")?;
        let integral = integrator.integrate(&spline, a, b, job.integration.subintervals);
        let elapsed_ns = start.elapsed().as_nanos();

        log::debug!("trial {}: {} ns", trial, elapsed_ns);
        if num_trials > 1 {
            println!(
                "  [{}/{}] integral = {:.8}, elapsed = {} ns",
                trial, num_trials, integral, elapsed_ns
            );
        }
        trials.push(TrialRecord {
            trial,
            elapsed_ns,
            integral,
        });
    }

    let analytic = function.analytic_integral(a, b);
    print_summary(function.name, a, b, analytic, &trials);

    Ok(BenchmarkOutput {
        function: function.name.to_string(),
        nodes: job.grid.nodes,
        subintervals: job.integration.subintervals,
        backend: backend_name,
        analytic,
        trials,
    })
}

/// Print the aggregate report for a finished run.
fn print_summary(name: &str, a: f64, b: f64, analytic: Option<f64>, trials: &[TrialRecord]) {
    let integral = trials[trials.len() - 1].integral;
    println!();
    println!(
        "Numerical integral of '{}' over [{:.4}, {:.4}]: {:.8}",
        name, a, b, integral
    );
    if let Some(exact) = analytic {
        println!("Analytic value: {:.8}", exact);
        println!("Absolute difference: {:.3e}", (integral - exact).abs());
    }

    let min_ns = trials.iter().map(|t| t.elapsed_ns).min().unwrap_or(0);
    let mean_ns = trials.iter().map(|t| t.elapsed_ns).sum::<u128>() / trials.len() as u128;
    println!(
        "Elapsed: min = {} ns, mean = {} ns over {} trial(s)",
        min_ns,
        mean_ns,
        trials.len()
    );
}

/// Write trial results to a CSV file with a metadata header.
pub fn write_trials_csv(output: &BenchmarkOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;

    // Metadata header
    writeln!(file, "# Batten Spline Benchmark — Trial Results")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# function: {}", output.function)?;
    writeln!(
        file,
        "# nodes: {}, subintervals: {}, backend: {}",
        output.nodes, output.subintervals, output.backend
    )?;
    if let Some(exact) = output.analytic {
        writeln!(file, "# analytic: {:.12}", exact)?;
    }
    writeln!(file, "#")?;

    writeln!(file, "trial,elapsed_ns,integral")?;
    for t in &output.trials {
        writeln!(file, "{},{},{:.12e}", t.trial, t.elapsed_ns, t.integral)?;
    }

    println!("Trial results written to: {}", path.display());
    Ok(())
}

/// Write trial results to a JSON file.
pub fn write_trials_json(output: &BenchmarkOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(output)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Trial results (JSON) written to: {}", path.display());
    Ok(())
}

/// Create a compute backend based on the user's preference string.
///
/// - `"serial"` — single-threaded reference backend.
/// - `"cpu"` — multi-threaded CPU backend.
/// - `"auto"` (default) — currently the CPU backend.
fn create_backend(preference: &str) -> Arc<dyn ComputeBackend> {
    match preference {
        "serial" => {
            println!("Backend: Serial (1 thread)");
            Arc::new(SerialBackend::new())
        }
        "cpu" => {
            let cpu = CpuBackend::new();
            println!("Backend: {}", cpu.device_info().name);
            Arc::new(cpu)
        }
        _ => {
            // "auto" or any unrecognised value
            let cpu = CpuBackend::new();
            println!("Backend: {} (auto-detected)", cpu.device_info().name);
            Arc::new(cpu)
        }
    }
}
