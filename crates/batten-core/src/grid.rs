//! Uniform sampling-grid helpers.
//!
//! Convenience routines for the common case of sampling a function on an
//! evenly spaced node grid before handing it to the spline builder.

/// Generate `n` evenly spaced, strictly increasing nodes spanning `[a, b]`.
///
/// The first node is exactly `a` and the last exactly `b`. A single-point
/// grid degenerates to `[a]`.
pub fn uniform_grid(a: f64, b: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i + 1 == n && n > 1 {
                b
            } else {
                a + (b - a) * i as f64 / (n - 1).max(1) as f64
            }
        })
        .collect()
}

/// Sample a function at each node.
pub fn sample<F: Fn(f64) -> f64>(f: F, nodes: &[f64]) -> Vec<f64> {
    nodes.iter().map(|&x| f(x)).collect()
}
