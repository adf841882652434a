//! Compute backend trait and device abstraction.
//!
//! The [`ComputeBackend`] trait abstracts over different execution
//! environments (serial, multi-threaded CPU) so that the numerical code in
//! `batten-core` remains scheduling-agnostic. The core hands a backend two
//! kinds of work: independent per-index array fills, and a sum reduction
//! over independent terms. Everything else in the pipeline is inherently
//! sequential and stays on the calling thread.

use thiserror::Error;

/// Errors originating from compute backends.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Backend not available: {0}")]
    Unavailable(String),
}

/// Describes the capabilities of a compute backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend_type: BackendType,
    pub threads: usize,
}

/// The type of compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Serial,
    Cpu,
}

/// Abstraction over compute backends.
///
/// Numerical code in `batten-core` operates against this trait. Both
/// operations are fork-join: every index in `0..len` is produced by exactly
/// one closure call, calls are free of cross-index dependencies, and the
/// method does not return until all of them have completed.
///
/// Implementations must tolerate any execution order. Floating-point
/// reduction order in [`parallel_sum`](ComputeBackend::parallel_sum) is
/// unspecified, so results may differ between backends within rounding
/// error of the serial left-to-right sum.
pub trait ComputeBackend: Send + Sync {
    /// Return information about the device.
    fn device_info(&self) -> DeviceInfo;

    /// Build a `len`-element array where slot `i` holds `fill_fn(i)`.
    ///
    /// This is the entry point for the independent fill phases of spline
    /// construction: copying sample values, differencing node spacings, and
    /// computing interior right-hand-side terms.
    fn parallel_fill(&self, len: usize, fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync)) -> Vec<f64>;

    /// Sum `term_fn(i)` over `i in 0..len`.
    ///
    /// Used by the quadrature loop, where each term is one sub-interval's
    /// trapezoid contribution. The combination must be a reduction (partial
    /// sums combined at the end or equivalent), never an unprotected shared
    /// accumulator.
    fn parallel_sum(&self, len: usize, term_fn: &(dyn Fn(usize) -> f64 + Send + Sync)) -> f64;
}
