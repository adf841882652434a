//! Single-threaded reference backend.
//!
//! Runs every phase on the calling thread in index order. Used as the
//! baseline for parity tests against the parallel backends, and as the
//! fallback when the crate is built without any of them.

use crate::backend::{BackendType, ComputeBackend, DeviceInfo};

/// Backend that executes all work sequentially on the calling thread.
#[derive(Debug, Default)]
pub struct SerialBackend;

impl SerialBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for SerialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Serial (1 thread)".into(),
            backend_type: BackendType::Serial,
            threads: 1,
        }
    }

    fn parallel_fill(&self, len: usize, fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync)) -> Vec<f64> {
        (0..len).map(fill_fn).collect()
    }

    fn parallel_sum(&self, len: usize, term_fn: &(dyn Fn(usize) -> f64 + Send + Sync)) -> f64 {
        (0..len).map(term_fn).sum()
    }
}
