//! CPU compute backend using Rayon for shared-memory parallelism.

use rayon::prelude::*;

use crate::backend::{BackendType, ComputeBackend, DeviceInfo};

/// CPU backend that parallelises work across threads via Rayon.
pub struct CpuBackend {
    num_threads: usize,
}

impl CpuBackend {
    /// Create a new CPU backend using all available threads.
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
        }
    }

    /// Create a CPU backend with a specified thread count.
    ///
    /// The count is informational (reported via
    /// [`device_info`](ComputeBackend::device_info)); work is scheduled on
    /// the global Rayon pool.
    pub fn with_threads(num_threads: usize) -> Self {
        Self { num_threads }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} threads)", self.num_threads),
            backend_type: BackendType::Cpu,
            threads: self.num_threads,
        }
    }

    fn parallel_fill(&self, len: usize, fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync)) -> Vec<f64> {
        (0..len).into_par_iter().map(fill_fn).collect()
    }

    fn parallel_sum(&self, len: usize, term_fn: &(dyn Fn(usize) -> f64 + Send + Sync)) -> f64 {
        // Rayon combines per-worker partial sums; the grouping (and hence
        // the exact rounding) depends on the split points.
        (0..len).into_par_iter().map(term_fn).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::SerialBackend;
    use approx::assert_relative_eq;

    #[test]
    fn fill_matches_serial_exactly() {
        let cpu = CpuBackend::new();
        let serial = SerialBackend::new();
        let f = |i: usize| (i as f64).sqrt() - 0.5 * i as f64;

        let a = cpu.parallel_fill(1000, &f);
        let b = serial.parallel_fill(1000, &f);
        assert_eq!(a, b);
    }

    #[test]
    fn sum_matches_serial_within_tolerance() {
        let cpu = CpuBackend::new();
        let serial = SerialBackend::new();
        let f = |i: usize| ((i as f64) * 0.37).sin();

        let a = cpu.parallel_sum(100_000, &f);
        let b = serial.parallel_sum(100_000, &f);
        assert_relative_eq!(a, b, max_relative = 1e-9);
    }

    #[test]
    fn empty_range_sums_to_zero() {
        let cpu = CpuBackend::new();
        assert_eq!(cpu.parallel_sum(0, &|_| 1.0), 0.0);
        assert!(cpu.parallel_fill(0, &|_| 1.0).is_empty());
    }
}
