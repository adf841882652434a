//! # Batten Compute
//!
//! Compute backend abstraction for the Batten framework. This crate
//! provides a [`ComputeBackend`](backend::ComputeBackend) trait that isolates
//! the numerical code from the execution strategy of its data-parallel
//! phases.
//!
//! ## Available backends
//!
//! | Backend | Feature flag | Status |
//! |---------|-------------|--------|
//! | Serial (single thread) | always on | Implemented |
//! | CPU (Rayon) | `cpu` (default) | Implemented |

pub mod backend;
pub mod serial;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use backend::{BackendType, ComputeBackend, ComputeError, DeviceInfo};
pub use serial::SerialBackend;

#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
