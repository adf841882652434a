//! Composite trapezoidal quadrature over a spline model.
//!
//! The integrand is the spline itself, not the raw samples: the interval
//! is split into equal-width cells, the spline is evaluated at each cell's
//! endpoints, and the trapezoid contributions are summed. Every cell is
//! independent given the finished model, so the per-cell work is handed to
//! a [`ComputeBackend`] and combined by a sum reduction.

use std::sync::Arc;

use batten_compute::ComputeBackend;

use crate::default_backend;
use crate::spline::NaturalSpline;

/// Composite trapezoidal integrator for [`NaturalSpline`] models.
pub struct Integrator {
    backend: Arc<dyn ComputeBackend>,
}

impl Integrator {
    /// Create an integrator using the default compute backend.
    pub fn new() -> Self {
        Self {
            backend: default_backend(),
        }
    }

    /// Create an integrator using a specific compute backend.
    pub fn with_backend(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    /// Approximate the integral of the spline over `[lower, upper]`.
    ///
    /// Partitions the interval into `subintervals` equal-width cells and
    /// sums the trapezoid contribution of each. Cell contributions are
    /// computed in parallel and combined by a reduction, so the exact
    /// rounding may differ between runs; results agree with the serial
    /// left-to-right sum within floating-point tolerance.
    ///
    /// Points outside the spline's node range are evaluated by boundary
    /// extrapolation, the same as [`NaturalSpline::evaluate`].
    ///
    /// # Panics
    /// Panics if `subintervals` is zero.
    pub fn integrate(
        &self,
        spline: &NaturalSpline,
        lower: f64,
        upper: f64,
        subintervals: usize,
    ) -> f64 {
        assert!(subintervals >= 1, "Need at least 1 subinterval");

        let dx = (upper - lower) / subintervals as f64;
        self.backend.parallel_sum(subintervals, &|i| {
            let x_left = lower + i as f64 * dx;
            let x_right = lower + (i + 1) as f64 * dx;
            let y_left = spline.evaluate(x_left);
            let y_right = spline.evaluate(x_right);
            0.5 * (y_left + y_right) * dx
        })
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Integrate a spline with the default backend.
///
/// Convenience wrapper around [`Integrator::integrate`].
pub fn integrate(spline: &NaturalSpline, lower: f64, upper: f64, subintervals: usize) -> f64 {
    Integrator::new().integrate(spline, lower, upper, subintervals)
}
