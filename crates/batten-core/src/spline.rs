//! Natural cubic spline construction and evaluation.
//!
//! [`SplineBuilder`] consumes a strictly increasing node array and the
//! function samples at those nodes, solves the tridiagonal system for the
//! natural-spline second-derivative conditions, and produces an immutable
//! [`NaturalSpline`]. On interval $[x_i, x_{i+1})$ the interpolant is
//!
//! $S_i(x) = a_i + b_i\,dx + c_i\,dx^2 + d_i\,dx^3, \quad dx = x - x_i$
//!
//! with zero curvature at both domain endpoints (the "natural" boundary).

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use batten_compute::ComputeBackend;

use crate::default_backend;

/// Errors that can occur during spline construction.
#[derive(Debug, Error)]
pub enum SplineError {
    #[error("Node and value arrays differ in length: {nodes} nodes vs {values} values")]
    LengthMismatch { nodes: usize, values: usize },

    #[error("Need at least {required} nodes for a cubic spline, got {actual}")]
    TooFewNodes { required: usize, actual: usize },

    #[error("Nodes must be strictly increasing (violated at index {index})")]
    NonIncreasingNodes { index: usize },

    #[error("Tridiagonal system is singular: zero pivot at row {row}")]
    SingularSystem { row: usize },

    #[error("Compute backend error: {0}")]
    Compute(String),
}

impl From<batten_compute::ComputeError> for SplineError {
    fn from(e: batten_compute::ComputeError) -> Self {
        SplineError::Compute(e.to_string())
    }
}

/// An immutable piecewise-cubic natural spline interpolant.
///
/// Built by [`SplineBuilder::build`]; read-only afterwards. The model is
/// `Send + Sync` and may be shared by any number of concurrent readers —
/// evaluation never mutates it.
#[derive(Debug, Clone, Serialize)]
pub struct NaturalSpline {
    /// Strictly increasing node coordinates.
    nodes: Vec<f64>,
    /// Function samples at each node.
    values: Vec<f64>,
    /// Constant coefficients; `coeff_a[i] == values[i]` by construction.
    coeff_a: Vec<f64>,
    coeff_b: Vec<f64>,
    coeff_c: Vec<f64>,
    coeff_d: Vec<f64>,
}

impl NaturalSpline {
    /// Evaluate the spline at a given x value.
    ///
    /// The enclosing interval is located by binary search for the last node
    /// at or below `x`, clamped to the interval range. Outside
    /// `[nodes[0], nodes[n-1]]` the boundary interval's polynomial is used
    /// unchanged, so out-of-range inputs silently extrapolate. This matches
    /// the in-range arithmetic exactly but is not a guaranteed contract.
    /// A NaN or infinite `x` propagates through ordinary float arithmetic.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.nodes.len();

        // Last interval index i with nodes[i] <= x, clamped to [0, n-2].
        let mut lo = 0;
        let mut hi = n - 2;
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.nodes[mid] <= x {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }

        let dx = x - self.nodes[lo];
        self.coeff_a[lo] + dx * (self.coeff_b[lo] + dx * (self.coeff_c[lo] + dx * self.coeff_d[lo]))
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The node coordinates.
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// The function samples at each node.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The interpolation domain `[first node, last node]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.nodes[0], self.nodes[self.nodes.len() - 1])
    }
}

/// Builds [`NaturalSpline`] models from sampled data.
///
/// The independent fill phases (sample copy, node spacings, interior
/// right-hand sides) run through the held [`ComputeBackend`]; the
/// tridiagonal recurrence is inherently sequential and always runs on the
/// calling thread.
pub struct SplineBuilder {
    backend: Arc<dyn ComputeBackend>,
}

impl SplineBuilder {
    /// Create a builder using the default compute backend.
    pub fn new() -> Self {
        Self {
            backend: default_backend(),
        }
    }

    /// Create a builder using a specific compute backend.
    pub fn with_backend(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    /// Construct a natural cubic spline through the given samples.
    ///
    /// # Arguments
    /// * `nodes` - Strictly increasing x coordinates, at least 3 of them.
    /// * `values` - Function samples at each node (same length as `nodes`).
    ///
    /// Construction is atomic: either a fully assembled model is returned
    /// or an error, never a partial one. Retrying with the same inputs is
    /// pointless — the computation is deterministic.
    pub fn build(&self, nodes: Vec<f64>, values: Vec<f64>) -> Result<NaturalSpline, SplineError> {
        if nodes.len() != values.len() {
            return Err(SplineError::LengthMismatch {
                nodes: nodes.len(),
                values: values.len(),
            });
        }
        if nodes.len() < 3 {
            return Err(SplineError::TooFewNodes {
                required: 3,
                actual: nodes.len(),
            });
        }
        for i in 1..nodes.len() {
            if nodes[i] <= nodes[i - 1] {
                return Err(SplineError::NonIncreasingNodes { index: i });
            }
        }

        let n = nodes.len();

        // Independent per-element fills; each index written exactly once.
        let coeff_a = self.backend.parallel_fill(n, &|i| values[i]);
        let h = self.backend.parallel_fill(n - 1, &|i| nodes[i + 1] - nodes[i]);
        let alpha = self.backend.parallel_fill(n - 1, &|i| {
            if i == 0 {
                0.0
            } else {
                3.0 / h[i] * (values[i + 1] - values[i]) - 3.0 / h[i - 1] * (values[i] - values[i - 1])
            }
        });

        // Forward elimination. Each step depends on the previous one, so
        // this pass is strictly sequential.
        let mut l = vec![0.0; n];
        let mut mu = vec![0.0; n - 1];
        let mut z = vec![0.0; n];
        l[0] = 1.0;
        mu[0] = 0.0;
        z[0] = 0.0;
        for i in 1..n - 1 {
            l[i] = 2.0 * (nodes[i + 1] - nodes[i - 1]) - h[i - 1] * mu[i - 1];
            if l[i] == 0.0 {
                return Err(SplineError::SingularSystem { row: i });
            }
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }
        l[n - 1] = 1.0;
        z[n - 1] = 0.0;

        // Back substitution, also sequential.
        let mut coeff_b = vec![0.0; n];
        let mut coeff_c = vec![0.0; n];
        let mut coeff_d = vec![0.0; n];
        coeff_c[n - 1] = 0.0;
        for j in (0..n - 1).rev() {
            coeff_c[j] = z[j] - mu[j] * coeff_c[j + 1];
            coeff_b[j] =
                (values[j + 1] - values[j]) / h[j] - h[j] * (coeff_c[j + 1] + 2.0 * coeff_c[j]) / 3.0;
            coeff_d[j] = (coeff_c[j + 1] - coeff_c[j]) / (3.0 * h[j]);
        }

        Ok(NaturalSpline {
            nodes,
            values,
            coeff_a,
            coeff_b,
            coeff_c,
            coeff_d,
        })
    }
}

impl Default for SplineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batten_compute::SerialBackend;

    fn build(nodes: Vec<f64>, values: Vec<f64>) -> NaturalSpline {
        SplineBuilder::new().build(nodes, values).unwrap()
    }

    #[test]
    fn spline_passes_through_data_points() {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![2.0, 3.0, 5.0, 4.0, 1.0];
        let spline = build(xs.clone(), ys.clone());

        for (x, y) in xs.iter().zip(ys.iter()) {
            let result = spline.evaluate(*x);
            assert!(
                (result - y).abs() < 1e-10,
                "Spline({}) = {} but expected {}",
                x,
                result,
                y
            );
        }
    }

    #[test]
    fn natural_boundary_has_zero_end_curvature() {
        let xs = vec![0.0, 0.5, 1.5, 2.0, 3.0];
        let ys = vec![1.0, -2.0, 0.5, 4.0, -1.0];
        let spline = build(xs, ys);

        let n = spline.nodes.len();
        assert_eq!(spline.coeff_c[n - 1], 0.0);
        // c[0] follows from the boundary choices l[0]=1, z[0]=0.
        assert!(spline.coeff_c[0].abs() < 1e-12);
    }

    #[test]
    fn constant_coefficients_equal_samples() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![-1.0, 7.0, 3.5, 0.25];
        let spline = build(xs, ys.clone());
        assert_eq!(spline.coeff_a, ys);
    }

    #[test]
    fn linear_data_reproduces_the_line() {
        // For values on a line the spline degenerates to that line: all
        // second derivatives vanish and each piece is the line itself.
        let k = 2.5;
        let m = -0.75;
        let xs = vec![0.0, 0.7, 1.3, 2.9, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| k * x + m).collect();
        let spline = build(xs, ys);

        for i in 0..=40 {
            let x = 0.1 * i as f64;
            let expected = k * x + m;
            assert!(
                (spline.evaluate(x) - expected).abs() < 1e-10,
                "deviation from line at x={}",
                x
            );
        }
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = SplineBuilder::new()
            .build(vec![0.0, 1.0, 2.0], vec![0.0, 1.0])
            .unwrap_err();
        assert!(matches!(
            err,
            SplineError::LengthMismatch { nodes: 3, values: 2 }
        ));
    }

    #[test]
    fn two_nodes_are_rejected() {
        let err = SplineBuilder::new()
            .build(vec![0.0, 1.0], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(
            err,
            SplineError::TooFewNodes { required: 3, actual: 2 }
        ));
    }

    #[test]
    fn coincident_nodes_are_rejected() {
        let err = SplineBuilder::new()
            .build(vec![0.0, 1.0, 1.0, 2.0], vec![0.0, 1.0, 1.0, 0.0])
            .unwrap_err();
        assert!(matches!(err, SplineError::NonIncreasingNodes { index: 2 }));
    }

    #[test]
    fn out_of_range_extrapolates_with_boundary_cubic() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 0.0, -1.0];
        let spline = build(xs, ys);

        // Beyond the last node the final interval's polynomial applies.
        let i = spline.nodes.len() - 2;
        let dx = 4.5 - spline.nodes[i];
        let expected = spline.coeff_a[i]
            + spline.coeff_b[i] * dx
            + spline.coeff_c[i] * dx * dx
            + spline.coeff_d[i] * dx * dx * dx;
        assert!((spline.evaluate(4.5) - expected).abs() < 1e-12);

        // Before the first node the first interval's polynomial applies.
        let dx = -1.0 - spline.nodes[0];
        let expected = spline.coeff_a[0]
            + spline.coeff_b[0] * dx
            + spline.coeff_c[0] * dx * dx
            + spline.coeff_d[0] * dx * dx * dx;
        assert!((spline.evaluate(-1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn nan_input_propagates() {
        let spline = build(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]);
        assert!(spline.evaluate(f64::NAN).is_nan());
    }

    #[test]
    fn serial_backend_builds_identical_model() {
        let xs: Vec<f64> = (0..64).map(|i| i as f64 * 0.1).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x * 1.7).sin()).collect();

        let default = SplineBuilder::new().build(xs.clone(), ys.clone()).unwrap();
        let serial = SplineBuilder::with_backend(Arc::new(SerialBackend::new()))
            .build(xs, ys)
            .unwrap();

        // The fills are element-wise and the recurrence is shared, so the
        // coefficient arrays agree bit-for-bit across backends.
        assert_eq!(default.coeff_b, serial.coeff_b);
        assert_eq!(default.coeff_c, serial.coeff_c);
        assert_eq!(default.coeff_d, serial.coeff_d);
    }
}
