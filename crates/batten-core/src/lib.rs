//! # Batten Core
//!
//! The numerical backbone of the Batten framework: natural cubic spline
//! interpolation over sampled data, and composite trapezoidal quadrature
//! over the resulting spline.
//!
//! ## Architecture
//!
//! [`spline::SplineBuilder`] consumes two equal-length arrays (strictly
//! increasing nodes and their sample values) and produces an immutable
//! [`spline::NaturalSpline`]. [`quadrature::Integrator`] then approximates
//! a definite integral by sampling the spline on a regular grid and
//! accumulating trapezoid contributions. Both delegate their data-parallel
//! phases to a [`batten_compute::ComputeBackend`]; the tridiagonal
//! recurrence inside the builder is inherently sequential and always runs
//! on the calling thread.
//!
//! ## Modules
//!
//! - [`spline`] — Builder, model, and point evaluation.
//! - [`quadrature`] — Composite trapezoidal integration of a spline.
//! - [`grid`] — Uniform sampling-grid helpers.

pub mod grid;
pub mod quadrature;
pub mod spline;

use std::sync::Arc;

use batten_compute::ComputeBackend;

#[cfg(feature = "cpu")]
pub(crate) fn default_backend() -> Arc<dyn ComputeBackend> {
    Arc::new(batten_compute::CpuBackend::new())
}

#[cfg(not(feature = "cpu"))]
pub(crate) fn default_backend() -> Arc<dyn ComputeBackend> {
    Arc::new(batten_compute::SerialBackend::new())
}
