//! Path-dependent observation infrastructure.
//!
//! # Key Components
//!
//! - [`BarrierMonitor`]: Streaming upward barrier detection with a sticky
//!   trigger flag
//!
//! Monitors observe prices incrementally in time order, so they can run
//! alongside path evaluation or over a completed path.

mod barrier;

pub use barrier::BarrierMonitor;
