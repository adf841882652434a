//! Integration test: spline quadrature vs the analytic integral of sin.
//!
//! This test validates the full pipeline — uniform sampling, spline
//! construction, and composite trapezoidal quadrature — against the
//! analytical result ∫ sin(x) dx = 2 over [0, π].

use std::f64::consts::PI;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use batten_compute::SerialBackend;
use batten_core::grid::{sample, uniform_grid};
use batten_core::quadrature::Integrator;
use batten_core::spline::SplineBuilder;

/// The reference benchmark configuration: 1001 nodes, 1001 subintervals.
#[test]
fn sin_integral_matches_analytic_result() {
    let nodes = uniform_grid(0.0, PI, 1001);
    let values = sample(f64::sin, &nodes);

    let spline = SplineBuilder::new()
        .build(nodes, values)
        .expect("valid sample arrays");
    let integral = Integrator::new().integrate(&spline, 0.0, PI, 1001);

    assert_abs_diff_eq!(integral, 2.0, epsilon = 1e-3);
}

/// Serial and parallel execution must agree end-to-end, not just per phase.
#[test]
fn backend_parity_end_to_end() {
    let nodes = uniform_grid(0.0, PI, 1001);
    let values = sample(f64::sin, &nodes);

    let serial_backend = Arc::new(SerialBackend::new());
    let serial = {
        let spline = SplineBuilder::with_backend(serial_backend.clone())
            .build(nodes.clone(), values.clone())
            .unwrap();
        Integrator::with_backend(serial_backend).integrate(&spline, 0.0, PI, 1001)
    };
    let parallel = {
        let spline = SplineBuilder::new().build(nodes, values).unwrap();
        Integrator::new().integrate(&spline, 0.0, PI, 1001)
    };

    let rel = (parallel - serial).abs() / serial.abs();
    assert!(
        rel < 1e-9,
        "serial {} and parallel {} integrals diverged",
        serial,
        parallel
    );
}

/// Interpolation must reproduce every sample exactly, here at scale.
#[test]
fn spline_reproduces_all_samples_at_scale() {
    let nodes = uniform_grid(0.0, PI, 1001);
    let values = sample(f64::sin, &nodes);
    let spline = SplineBuilder::new()
        .build(nodes.clone(), values.clone())
        .unwrap();

    for (x, y) in nodes.iter().zip(values.iter()) {
        assert!(
            (spline.evaluate(*x) - y).abs() < 1e-10,
            "sample not reproduced at x={}",
            x
        );
    }
}
